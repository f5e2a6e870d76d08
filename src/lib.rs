pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, ReportConfig};

pub use crate::core::convert::{response_to_table, serializable_to_table, value_to_table, ConvertOptions};
pub use crate::core::engine::ReportEngine;
pub use crate::core::errors::format_errors;
pub use crate::core::extract::{get_non_href_response, get_portfolio_from_href};
pub use crate::core::formatters::{
    format_holdings_response, format_instruments_response, format_portfolios_response,
    format_quotes_response, format_response, format_transactions_response,
};
pub use crate::core::report::ReportPipeline;
pub use domain::model::{ApiException, FileType};
pub use domain::table::Table;
pub use utils::error::{ReportError, Result};
pub use utils::validation::check_dict_for_required_keys;
