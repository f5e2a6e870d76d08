pub mod convert;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod formatters;
pub mod report;

pub use crate::domain::model::{CategoryReport, ReportSet};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
