use crate::domain::model::FileType;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_categories, validate_non_empty_string, validate_output_formats, validate_path,
    validate_required_field, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "response-tables")]
#[command(about = "Turn saved LUSID load responses into tables")]
pub struct CliConfig {
    #[arg(long, help = "JSON file holding the response")]
    pub input: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Categories to report, default all present")]
    pub categories: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Bundle every output into this zip archive")]
    pub zip: Option<String>,

    #[arg(long, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Input is a single response object, not a batch load")]
    pub single: bool,

    #[arg(long, help = "Spread nested objects into dotted columns")]
    pub flatten: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn categories(&self) -> Vec<FileType> {
        self.categories
            .iter()
            .filter_map(|c| c.parse().ok())
            .collect()
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn archive_name(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    fn single_response(&self) -> bool {
        self.single
    }

    fn flatten_nested(&self) -> bool {
        self.flatten
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = validate_required_field("input", &self.input)?;
        validate_path("input", input)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("output_formats", &self.output_formats)?;
        validate_categories("categories", &self.categories)?;
        if let Some(zip) = &self.zip {
            validate_non_empty_string("zip", zip)?;
        }
        Ok(())
    }
}
