use crate::domain::model::FileType;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_categories, validate_non_empty_string, validate_output_formats, validate_path,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub report: ReportSection,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub categories: Option<Vec<String>>,
    pub single_response: Option<bool>,
    pub flatten_nested: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

impl ReportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPORT_DIR})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("report.name", &self.report.name)?;
        validate_path("input.path", &self.input.path)?;
        validate_path("output.output_path", &self.output.output_path)?;
        validate_output_formats("output.output_formats", &self.output.output_formats)?;
        if let Some(categories) = &self.input.categories {
            validate_categories("input.categories", categories)?;
        }
        if let Some(compression) = self.output.compression.as_ref().filter(|c| c.enabled) {
            validate_non_empty_string("output.compression.filename", &compression.filename)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ReportConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn categories(&self) -> Vec<FileType> {
        self.input
            .categories
            .iter()
            .flatten()
            .filter_map(|c| c.parse().ok())
            .collect()
    }

    fn output_formats(&self) -> &[String] {
        &self.output.output_formats
    }

    fn archive_name(&self) -> Option<&str> {
        self.output
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn single_response(&self) -> bool {
        self.input.single_response.unwrap_or(false)
    }

    fn flatten_nested(&self) -> bool {
        self.input.flatten_nested.unwrap_or(false)
    }
}
