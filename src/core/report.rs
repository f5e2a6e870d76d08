use crate::adapters::json::{decode_category, present_categories};
use crate::core::convert::{value_to_table, ConvertOptions};
use crate::core::formatters::category_report;
use crate::core::{ConfigProvider, Pipeline, ReportSet, Storage};
use crate::domain::model::{ManifestEntry, ReportManifest};
use crate::domain::table::Table;
use crate::utils::error::{ReportError, Result};
use serde_json::Value;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const MANIFEST_FILE: &str = "manifest.json";

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn render(&self, table: &Table, format: &str) -> Result<String> {
        match format {
            "csv" => table.to_csv(),
            "tsv" => table.to_tsv(),
            "json" => table.to_json(),
            other => Err(ReportError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format".to_string(),
            }),
        }
    }

    /// 每個表格依輸出格式產生 (檔名, 內容)
    fn render_all(
        &self,
        name: &str,
        table: &Table,
        files: &mut Vec<(String, String)>,
    ) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for format in self.config.output_formats() {
            let file_name = format!("{}.{}", name, format);
            files.push((file_name.clone(), self.render(table, format)?));
            names.push(file_name);
        }
        Ok(names)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Value> {
        tracing::debug!("Reading response from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        let response: Value = serde_json::from_slice(&bytes)?;
        Ok(response)
    }

    async fn transform(&self, response: Value) -> Result<ReportSet> {
        if self.config.single_response() {
            let options = ConvertOptions {
                flatten_nested: self.config.flatten_nested(),
            };
            return Ok(ReportSet {
                reports: Vec::new(),
                single: Some(value_to_table(&response, &options)?),
            });
        }

        let mut categories = self.config.categories();
        if categories.is_empty() {
            categories = present_categories(&response);
            tracing::debug!("No categories configured, found {:?}", categories);
        }

        let mut reports = Vec::with_capacity(categories.len());
        for file_type in categories {
            let report = category_report(&decode_category(&response, file_type)?)?;
            tracing::info!(
                "📊 {}: {} successful, {} errored{}",
                file_type,
                report.successful.len(),
                report.errors.len(),
                report
                    .failed
                    .as_ref()
                    .map(|f| format!(", {} failed", f.len()))
                    .unwrap_or_default()
            );
            reports.push(report);
        }

        Ok(ReportSet {
            reports,
            single: None,
        })
    }

    async fn load(&self, result: ReportSet) -> Result<String> {
        let mut files: Vec<(String, String)> = Vec::new();
        let mut entries = Vec::new();

        for report in &result.reports {
            let prefix = report.file_type.as_str();
            let successful_name = format!("{}_successful", prefix);
            let mut names = self.render_all(&successful_name, &report.successful, &mut files)?;
            let errors_name = format!("{}_errors", prefix);
            names.extend(self.render_all(&errors_name, &report.errors, &mut files)?);
            if let Some(failed) = &report.failed {
                let failed_name = format!("{}_failed", prefix);
                names.extend(self.render_all(&failed_name, failed, &mut files)?);
            }

            entries.push(ManifestEntry {
                category: report.file_type,
                successful: report.successful.len(),
                errors: report.errors.len(),
                failed: report.failed.as_ref().map(Table::len),
                files: names,
            });
        }

        let single_files = match &result.single {
            Some(table) => self.render_all("response", table, &mut files)?,
            None => Vec::new(),
        };

        let manifest = ReportManifest {
            generated_at: chrono::Utc::now(),
            source: self.config.input_path().to_string(),
            entries,
            files: single_files,
        };
        files.push((MANIFEST_FILE.to_string(), serde_json::to_string_pretty(&manifest)?));

        let output_path = self.config.output_path();
        match self.config.archive_name() {
            Some(archive) => {
                tracing::debug!("Creating ZIP file with {} files", files.len());

                let zip_data = {
                    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                    for (name, content) in &files {
                        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                        zip.write_all(content.as_bytes())?;
                    }
                    let cursor = zip.finish()?;
                    cursor.into_inner()
                };

                let path = format!("{}/{}", output_path, archive);
                tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
                self.storage.write_file(&path, &zip_data).await?;
                Ok(path)
            }
            None => {
                for (name, content) in &files {
                    self.storage
                        .write_file(&format!("{}/{}", output_path, name), content.as_bytes())
                        .await?;
                }
                tracing::debug!("Wrote {} files", files.len());
                Ok(output_path.to_string())
            }
        }
    }
}
