use crate::domain::model::{BatchResponse, FileType, UpsertBatch};
use crate::utils::error::{ReportError, Result};

/// 從 href 取出 portfolio code：以 `/` 切開後的倒數第二段
///
/// `file_type` only labels the error; every category uses the same rule.
pub fn get_portfolio_from_href<S: AsRef<str>>(hrefs: &[S], file_type: FileType) -> Result<Vec<String>> {
    hrefs
        .iter()
        .map(|href| {
            let href = href.as_ref();
            let segments: Vec<&str> = href.split('/').collect();
            if segments.len() < 2 {
                return Err(ReportError::ReferenceFormatError {
                    reference: href.to_string(),
                    file_type: file_type.to_string(),
                    segments: segments.len(),
                });
            }
            Ok(segments[segments.len() - 2].to_string())
        })
        .collect()
}

/// Keys of every batch's `values` and `failed` maps, concatenated batch by batch.
pub fn get_non_href_response(response: &BatchResponse<UpsertBatch>) -> (Vec<String>, Vec<String>) {
    let items_success = response
        .success
        .iter()
        .flat_map(|batch| batch.values.keys().cloned())
        .collect();

    let items_failed = response
        .success
        .iter()
        .flat_map(|batch| batch.failed.keys().cloned())
        .collect();

    (items_success, items_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn keyed(keys: &[&str]) -> Map<String, Value> {
        keys.iter().map(|k| (k.to_string(), json!({}))).collect()
    }

    #[test]
    fn test_portfolio_code_from_href() {
        let hrefs = [
            "/api/portfolios/EQUITY1/transactions",
            "https://example.lusid.com/api/api/transactionportfolios/UK/GLOBAL-EQ/holdings",
        ];
        let codes = get_portfolio_from_href(&hrefs, FileType::Transactions).unwrap();
        assert_eq!(codes, vec!["EQUITY1", "GLOBAL-EQ"]);
    }

    #[test]
    fn test_portfolio_code_two_segments() {
        let codes = get_portfolio_from_href(&["CODE/holdings"], FileType::Holdings).unwrap();
        assert_eq!(codes, vec!["CODE"]);
    }

    #[test]
    fn test_portfolio_code_segment_underflow() {
        let hrefs = ["/api/portfolios/P1/transactions", "no-slashes"];
        let err = get_portfolio_from_href(&hrefs, FileType::Transactions).unwrap_err();
        match err {
            ReportError::ReferenceFormatError {
                reference,
                file_type,
                segments,
            } => {
                assert_eq!(reference, "no-slashes");
                assert_eq!(file_type, "transactions");
                assert_eq!(segments, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_href_response_concatenates_batches_in_order() {
        let response = BatchResponse {
            success: vec![
                UpsertBatch {
                    values: keyed(&["ClientInternal: imd_1", "ClientInternal: imd_2"]),
                    failed: keyed(&["ClientInternal: bad_1"]),
                },
                UpsertBatch {
                    values: keyed(&["ClientInternal: imd_3"]),
                    failed: Map::new(),
                },
                UpsertBatch {
                    values: Map::new(),
                    failed: keyed(&["ClientInternal: bad_2"]),
                },
            ],
            errors: vec![],
        };

        let (success, failed) = get_non_href_response(&response);
        assert_eq!(
            success,
            vec!["ClientInternal: imd_1", "ClientInternal: imd_2", "ClientInternal: imd_3"]
        );
        assert_eq!(failed, vec!["ClientInternal: bad_1", "ClientInternal: bad_2"]);
    }
}
