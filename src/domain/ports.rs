use crate::domain::model::{ApiException, FileType, ReportSet};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can list its public attributes, in declaration order.
pub trait NamedFields {
    fn named_fields(&self) -> Vec<(String, Value)>;
}

/// Capability of an error returned for a batch: an HTTP-like status and a reason.
pub trait ErrorDescriptor {
    fn status(&self) -> u16;
    fn reason(&self) -> &str;
}

impl ErrorDescriptor for ApiException {
    fn status(&self) -> u16 {
        self.status
    }

    fn reason(&self) -> &str {
        &self.reason
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Empty means every category present in the response.
    fn categories(&self) -> Vec<FileType>;
    fn output_formats(&self) -> &[String];
    /// Archive name when outputs are bundled, `None` for loose files.
    fn archive_name(&self) -> Option<&str>;
    /// Input is one response object rather than a batch load keyed by category.
    fn single_response(&self) -> bool;
    fn flatten_nested(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Value>;
    async fn transform(&self, response: Value) -> Result<ReportSet>;
    async fn load(&self, reports: ReportSet) -> Result<String>;
}
