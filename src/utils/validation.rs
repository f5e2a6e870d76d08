use crate::domain::model::FileType;
use crate::utils::error::{ReportError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const OUTPUT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 檢查 mapping 是否包含所有必要的 key，遇到第一個缺少的 key 就回報
pub fn check_dict_for_required_keys(
    target: &Map<String, Value>,
    target_name: &str,
    required_keys: &[&str],
) -> Result<()> {
    match required_keys.iter().find(|key| !target.contains_key(**key)) {
        Some(key) => Err(ReportError::missing_key(key, target_name, required_keys)),
        None => Ok(()),
    }
}

/// Same as [`check_dict_for_required_keys`] for a value that must first be a JSON object.
pub fn check_value_for_required_keys<'a>(
    target: &'a Value,
    target_name: &str,
    required_keys: &[&str],
) -> Result<&'a Map<String, Value>> {
    let map = target
        .as_object()
        .ok_or_else(|| ReportError::type_mismatch(&format!("{} to be an object", target_name), target))?;
    check_dict_for_required_keys(map, target_name, required_keys)?;
    Ok(map)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ReportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    let allowed: HashSet<&str> = OUTPUT_FORMATS.iter().copied().collect();
    for format in formats {
        if !allowed.contains(format.as_str()) {
            return Err(ReportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_categories(field_name: &str, categories: &[String]) -> Result<Vec<FileType>> {
    categories
        .iter()
        .map(|name| {
            name.parse::<FileType>()
                .map_err(|_| ReportError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: name.clone(),
                    reason: format!(
                        "Unknown category. Valid categories: {}",
                        FileType::ALL
                            .iter()
                            .map(|t| t.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })
        })
        .collect()
}
