use crate::domain::table::Table;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Category of a batch load, also the key of its partition in a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Instruments,
    Portfolios,
    Transactions,
    Holdings,
    Quotes,
}

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Instruments,
        FileType::Portfolios,
        FileType::Transactions,
        FileType::Holdings,
        FileType::Quotes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Instruments => "instruments",
            FileType::Portfolios => "portfolios",
            FileType::Transactions => "transactions",
            FileType::Holdings => "holdings",
            FileType::Quotes => "quotes",
        }
    }

    /// Only instrument and quote upserts report per-item rejections.
    pub fn has_failed_partition(&self) -> bool {
        matches!(self, FileType::Instruments | FileType::Quotes)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Error returned by the API for a whole batch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiException {
    pub status: u16,
    pub reason: String,
}

impl ApiException {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceId {
    #[serde(default)]
    pub scope: Option<String>,
    pub code: String,
}

/// Upsert result keyed by the caller's correlation ids (instruments, quotes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsertBatch {
    pub values: Map<String, Value>,
    pub failed: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBatch {
    pub id: ResourceId,
}

/// Upsert result that only links back to the portfolio it touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefBatch {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse<T> {
    pub success: Vec<T>,
    pub errors: Vec<ApiException>,
}

impl<T> Default for BatchResponse<T> {
    fn default() -> Self {
        Self {
            success: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// A category's batch response once decoded at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryResponse {
    Instruments(BatchResponse<UpsertBatch>),
    Portfolios(BatchResponse<PortfolioBatch>),
    Transactions(BatchResponse<HrefBatch>),
    Holdings(BatchResponse<HrefBatch>),
    Quotes(BatchResponse<UpsertBatch>),
}

impl CategoryResponse {
    pub fn file_type(&self) -> FileType {
        match self {
            CategoryResponse::Instruments(_) => FileType::Instruments,
            CategoryResponse::Portfolios(_) => FileType::Portfolios,
            CategoryResponse::Transactions(_) => FileType::Transactions,
            CategoryResponse::Holdings(_) => FileType::Holdings,
            CategoryResponse::Quotes(_) => FileType::Quotes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub file_type: FileType,
    pub successful: Table,
    pub errors: Table,
    pub failed: Option<Table>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSet {
    pub reports: Vec<CategoryReport>,
    /// Table of a single converted response, when the input was not a batch load.
    pub single: Option<Table>,
}

impl ReportSet {
    pub fn get(&self, file_type: FileType) -> Option<&CategoryReport> {
        self.reports.iter().find(|r| r.file_type == file_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub category: FileType,
    pub successful: usize,
    pub errors: usize,
    pub failed: Option<usize>,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportManifest {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub source: String,
    pub entries: Vec<ManifestEntry>,
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_parsing() {
        assert_eq!("instruments".parse::<FileType>().unwrap(), FileType::Instruments);
        assert_eq!(" Quotes ".parse::<FileType>().unwrap(), FileType::Quotes);
        assert!("bonds".parse::<FileType>().is_err());
        assert_eq!(FileType::Holdings.to_string(), "holdings");
    }

    #[test]
    fn test_failed_partition_only_for_keyed_upserts() {
        let with_failed: Vec<FileType> = FileType::ALL
            .into_iter()
            .filter(|t| t.has_failed_partition())
            .collect();
        assert_eq!(with_failed, vec![FileType::Instruments, FileType::Quotes]);
    }

    #[test]
    fn test_resource_id_scope_is_optional() {
        let batch: PortfolioBatch = serde_json::from_str(r#"{"id": {"code": "P1"}}"#).unwrap();
        assert_eq!(batch.id.code, "P1");
        assert_eq!(batch.id.scope, None);

        let id: ResourceId = serde_json::from_str(r#"{"scope": "demo", "code": "P2"}"#).unwrap();
        assert_eq!(id.scope.as_deref(), Some("demo"));
        assert!(serde_json::from_str::<ResourceId>(r#"{"scope": "demo"}"#).is_err());
    }
}
