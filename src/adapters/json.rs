//! Boundary between the raw JSON a load produces and the typed records the
//! formatters work on. Every structural check on a response lives here.

use crate::domain::model::{ApiException, BatchResponse, CategoryResponse, FileType};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::check_value_for_required_keys;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const BATCH_KEYS: [&str; 2] = ["errors", "success"];

/// Partition of a load response for `file_type`, checked for `errors` and `success`.
pub fn category_partition(response: &Value, file_type: FileType) -> Result<&Value> {
    let root = check_value_for_required_keys(response, "response", &[file_type.as_str()])?;
    let partition = &root[file_type.as_str()];
    check_value_for_required_keys(
        partition,
        &format!("Response from {} request", file_type),
        &BATCH_KEYS,
    )?;
    Ok(partition)
}

/// Turn one error item into an [`ApiException`]; anything without an integer
/// `status` and a string `reason` is rejected with its JSON representation.
pub fn api_exception_from_value(value: &Value) -> Result<ApiException> {
    let status = value
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok());
    let reason = value.get("reason").and_then(Value::as_str);

    match (status, reason) {
        (Some(status), Some(reason)) => Ok(ApiException::new(status, reason)),
        _ => Err(ReportError::type_mismatch("instance of ApiException", value)),
    }
}

pub fn api_exceptions_from_values(values: &[Value]) -> Result<Vec<ApiException>> {
    values.iter().map(api_exception_from_value).collect()
}

pub fn decode_batch_response<T: DeserializeOwned>(
    partition: &Value,
    file_type: FileType,
) -> Result<BatchResponse<T>> {
    let success = sequence(&partition["success"], file_type, "success")?
        .iter()
        .map(|batch| {
            serde_json::from_value::<T>(batch.clone()).map_err(|e| ReportError::TypeMismatchError {
                expected: format!("{} success batch ({})", file_type, e),
                found: batch.to_string(),
            })
        })
        .collect::<Result<Vec<T>>>()?;

    let errors = api_exceptions_from_values(sequence(&partition["errors"], file_type, "errors")?)?;

    Ok(BatchResponse { success, errors })
}

/// Decode the `file_type` partition of a load response into its typed form.
pub fn decode_category(response: &Value, file_type: FileType) -> Result<CategoryResponse> {
    let partition = category_partition(response, file_type)?;
    let decoded = match file_type {
        FileType::Instruments => CategoryResponse::Instruments(decode_batch_response(partition, file_type)?),
        FileType::Portfolios => CategoryResponse::Portfolios(decode_batch_response(partition, file_type)?),
        FileType::Transactions => {
            CategoryResponse::Transactions(decode_batch_response(partition, file_type)?)
        }
        FileType::Holdings => CategoryResponse::Holdings(decode_batch_response(partition, file_type)?),
        FileType::Quotes => CategoryResponse::Quotes(decode_batch_response(partition, file_type)?),
    };
    tracing::debug!("Decoded {} partition", file_type);
    Ok(decoded)
}

/// Categories with a partition in `response`, in [`FileType::ALL`] order.
pub fn present_categories(response: &Value) -> Vec<FileType> {
    match response.as_object() {
        Some(root) => FileType::ALL
            .into_iter()
            .filter(|t| root.contains_key(t.as_str()))
            .collect(),
        None => Vec::new(),
    }
}

fn sequence<'a>(value: &'a Value, file_type: FileType, key: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ReportError::type_mismatch(&format!("'{}' of {} response to be a list", key, file_type), value))
}
