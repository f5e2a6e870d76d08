use crate::adapters::json::{category_partition, decode_batch_response, decode_category};
use crate::core::errors::format_errors;
use crate::core::extract::{get_non_href_response, get_portfolio_from_href};
use crate::domain::model::{
    BatchResponse, CategoryReport, CategoryResponse, FileType, HrefBatch, PortfolioBatch,
    UpsertBatch,
};
use crate::domain::table::Table;
use crate::utils::error::Result;
use serde_json::Value;

pub const SUCCESS_COLUMN: &str = "successful items";
pub const FAILED_COLUMN: &str = "failed_items";

/// (successful, errored, failed) tables for keyed upserts.
pub fn keyed_tables(response: &BatchResponse<UpsertBatch>) -> (Table, Table, Table) {
    let (items_success, items_failed) = get_non_href_response(response);
    (
        Table::from_column(SUCCESS_COLUMN, items_success),
        format_errors(&response.errors),
        Table::from_column(FAILED_COLUMN, items_failed),
    )
}

pub fn portfolio_tables(response: &BatchResponse<PortfolioBatch>) -> (Table, Table) {
    let items_success = response.success.iter().map(|batch| batch.id.code.as_str());
    (
        Table::from_column(SUCCESS_COLUMN, items_success),
        format_errors(&response.errors),
    )
}

pub fn href_tables(
    response: &BatchResponse<HrefBatch>,
    file_type: FileType,
) -> Result<(Table, Table)> {
    let hrefs: Vec<&str> = response.success.iter().map(|batch| batch.href.as_str()).collect();
    let codes = get_portfolio_from_href(&hrefs, file_type)?;
    Ok((
        Table::from_column(SUCCESS_COLUMN, codes),
        format_errors(&response.errors),
    ))
}

/// Unpack an instruments load: successful ids, errored batches and ids LUSID rejected.
pub fn format_instruments_response(response: &Value) -> Result<(Table, Table, Table)> {
    let partition = category_partition(response, FileType::Instruments)?;
    let batch = decode_batch_response(partition, FileType::Instruments)?;
    Ok(log_counts(FileType::Instruments, keyed_tables(&batch)))
}

/// Portfolios have no per-item rejections, only successes and errored batches.
pub fn format_portfolios_response(response: &Value) -> Result<(Table, Table)> {
    let partition = category_partition(response, FileType::Portfolios)?;
    let batch = decode_batch_response(partition, FileType::Portfolios)?;
    let (successful, errors) = portfolio_tables(&batch);
    tracing::debug!(
        "📊 portfolios: {} successful, {} errored",
        successful.len(),
        errors.len()
    );
    Ok((successful, errors))
}

pub fn format_transactions_response(response: &Value) -> Result<(Table, Table)> {
    let partition = category_partition(response, FileType::Transactions)?;
    let batch = decode_batch_response(partition, FileType::Transactions)?;
    href_tables(&batch, FileType::Transactions)
}

pub fn format_holdings_response(response: &Value) -> Result<(Table, Table)> {
    let partition = category_partition(response, FileType::Holdings)?;
    let batch = decode_batch_response(partition, FileType::Holdings)?;
    href_tables(&batch, FileType::Holdings)
}

pub fn format_quotes_response(response: &Value) -> Result<(Table, Table, Table)> {
    let partition = category_partition(response, FileType::Quotes)?;
    let batch = decode_batch_response(partition, FileType::Quotes)?;
    Ok(log_counts(FileType::Quotes, keyed_tables(&batch)))
}

/// Tables for an already decoded category.
pub fn category_report(response: &CategoryResponse) -> Result<CategoryReport> {
    let file_type = response.file_type();
    let (successful, errors, failed) = match response {
        CategoryResponse::Instruments(batch) | CategoryResponse::Quotes(batch) => {
            let (successful, errors, failed) = keyed_tables(batch);
            (successful, errors, Some(failed))
        }
        CategoryResponse::Portfolios(batch) => {
            let (successful, errors) = portfolio_tables(batch);
            (successful, errors, None)
        }
        CategoryResponse::Transactions(batch) | CategoryResponse::Holdings(batch) => {
            let (successful, errors) = href_tables(batch, file_type)?;
            (successful, errors, None)
        }
    };

    Ok(CategoryReport {
        file_type,
        successful,
        errors,
        failed,
    })
}

/// Format the `file_type` partition of a load response.
pub fn format_response(response: &Value, file_type: FileType) -> Result<CategoryReport> {
    category_report(&decode_category(response, file_type)?)
}

fn log_counts(file_type: FileType, tables: (Table, Table, Table)) -> (Table, Table, Table) {
    tracing::debug!(
        "📊 {}: {} successful, {} errored, {} failed",
        file_type,
        tables.0.len(),
        tables.1.len(),
        tables.2.len()
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_report_shapes() {
        let response = json!({
            "instruments": {"success": [{"values": {"A": {}}, "failed": {"B": {}}}], "errors": []},
            "portfolios": {"success": [{"id": {"scope": "s", "code": "P1"}}], "errors": []},
            "holdings": {"success": [{"href": "/api/portfolios/s/H1/holdings"}], "errors": []}
        });

        let instruments = format_response(&response, FileType::Instruments).unwrap();
        assert_eq!(instruments.failed.unwrap().get(0, FAILED_COLUMN), Some(&json!("B")));

        let portfolios = format_response(&response, FileType::Portfolios).unwrap();
        assert!(portfolios.failed.is_none());
        assert_eq!(portfolios.successful.get(0, SUCCESS_COLUMN), Some(&json!("P1")));

        let holdings = format_response(&response, FileType::Holdings).unwrap();
        assert_eq!(holdings.successful.get(0, SUCCESS_COLUMN), Some(&json!("H1")));
        assert_eq!(holdings.errors.columns(), ["error_items", "status"]);
    }

    #[test]
    fn test_href_tables_propagate_underflow() {
        let batch = BatchResponse {
            success: vec![HrefBatch { href: "broken".to_string() }],
            errors: vec![],
        };
        assert!(href_tables(&batch, FileType::Transactions).is_err());
    }
}
