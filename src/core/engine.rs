use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("📥 Reading response...");
        let response = self.pipeline.extract().await?;

        tracing::info!("🔄 Formatting tables...");
        let reports = self.pipeline.transform(response).await?;
        tracing::info!(
            "Formatted {} categories{}",
            reports.reports.len(),
            if reports.single.is_some() { " and one single response" } else { "" }
        );

        tracing::info!("📤 Writing tables...");
        let output_path = self.pipeline.load(reports).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
