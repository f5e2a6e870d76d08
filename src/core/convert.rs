//! Object-to-table conversion for single API responses.
//!
//! Every response becomes rows of records with one column per public
//! attribute. A plain object is a single row; a list response (an object
//! carrying a `values` sequence) is one row per element of `values`.
//! Attributes starting with `_` are internal and never become columns.

use crate::domain::model::ApiException;
use crate::domain::ports::NamedFields;
use crate::domain::table::Table;
use crate::utils::error::{ReportError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

pub const LIST_KEY: &str = "values";
const NESTED_SEPARATOR: &str = ".";

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Spread nested objects into `parent.child` columns.
    pub flatten_nested: bool,
}

impl NamedFields for Map<String, Value> {
    fn named_fields(&self) -> Vec<(String, Value)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl NamedFields for ApiException {
    fn named_fields(&self) -> Vec<(String, Value)> {
        vec![
            ("status".to_string(), Value::from(self.status)),
            ("reason".to_string(), Value::from(self.reason.as_str())),
        ]
    }
}

/// One row, one column per public attribute.
pub fn response_to_table<T: NamedFields + ?Sized>(response: &T) -> Table {
    let mut table = Table::default();
    table.push_record(public_fields(response.named_fields(), &ConvertOptions::default()));
    table
}

/// One row per record; columns appear in first-seen order.
pub fn response_list_to_table<T: NamedFields>(values: &[T], options: &ConvertOptions) -> Table {
    let mut table = Table::default();
    for value in values {
        table.push_record(public_fields(value.named_fields(), options));
    }
    table
}

/// Entry point for typed responses: anything serde can see as an object.
pub fn serializable_to_table<T: Serialize + ?Sized>(
    response: &T,
    options: &ConvertOptions,
) -> Result<Table> {
    value_to_table(&serde_json::to_value(response)?, options)
}

/// Entry point for raw responses. Strings, numbers, booleans, null and bare
/// arrays have no named attributes and are rejected.
pub fn value_to_table(response: &Value, options: &ConvertOptions) -> Result<Table> {
    let map = response
        .as_object()
        .ok_or_else(|| ReportError::type_mismatch("object with named attributes", response))?;

    match map.get(LIST_KEY) {
        Some(Value::Array(items)) => {
            let records = items
                .iter()
                .map(|item| {
                    item.as_object()
                        .cloned()
                        .ok_or_else(|| {
                            ReportError::type_mismatch("list element with named attributes", item)
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            tracing::debug!("Converting list response with {} values", records.len());
            Ok(response_list_to_table(&records, options))
        }
        _ => Ok(response_list_to_table(std::slice::from_ref(map), options)),
    }
}

fn public_fields(fields: Vec<(String, Value)>, options: &ConvertOptions) -> Vec<(String, Value)> {
    let mut out = Vec::with_capacity(fields.len());
    for (name, value) in fields.into_iter().filter(|(name, _)| !name.starts_with('_')) {
        if options.flatten_nested {
            flatten_into(name, value, &mut out);
        } else {
            out.push((name, value));
        }
    }
    out
}

fn flatten_into(prefix: String, value: Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, nested) in map {
                if key.starts_with('_') {
                    continue;
                }
                flatten_into(format!("{}{}{}", prefix, NESTED_SEPARATOR, key), nested, out);
            }
        }
        other => out.push((prefix, other)),
    }
}
