use anyhow::Result;
use response_tables::domain::ports::ConfigProvider;
use response_tables::{FileType, LocalStorage, ReportEngine, ReportError, ReportPipeline};
use serde_json::json;
use std::io::Read;
use tempfile::TempDir;

struct TestConfig {
    input_path: String,
    output_path: String,
    categories: Vec<FileType>,
    output_formats: Vec<String>,
    archive_name: Option<String>,
    single: bool,
}

impl TestConfig {
    fn new(output_formats: &[&str]) -> Self {
        Self {
            input_path: "load.json".to_string(),
            output_path: "reports".to_string(),
            categories: vec![],
            output_formats: output_formats.iter().map(|f| f.to_string()).collect(),
            archive_name: None,
            single: false,
        }
    }
}

impl ConfigProvider for TestConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn categories(&self) -> Vec<FileType> {
        self.categories.clone()
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn archive_name(&self) -> Option<&str> {
        self.archive_name.as_deref()
    }

    fn single_response(&self) -> bool {
        self.single
    }

    fn flatten_nested(&self) -> bool {
        true
    }
}

fn load_response() -> serde_json::Value {
    json!({
        "instruments": {
            "success": [{"values": {"imd_1": {}, "imd_2": {}}, "failed": {"imd_3": {}}}],
            "errors": [{"status": 400, "reason": "Bad Request"}]
        },
        "portfolios": {
            "success": [{"id": {"code": "P1"}}],
            "errors": []
        }
    })
}

async fn write_input(dir: &TempDir, value: &serde_json::Value) -> Result<()> {
    tokio::fs::write(dir.path().join("load.json"), serde_json::to_vec(value)?).await?;
    Ok(())
}

fn storage_for(dir: &TempDir) -> LocalStorage {
    LocalStorage::new(dir.path().to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_report_writes_loose_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_input(&temp_dir, &load_response()).await?;

    let pipeline = ReportPipeline::new(storage_for(&temp_dir), TestConfig::new(&["csv", "json"]));
    let output_path = ReportEngine::new(pipeline).run().await?;
    assert_eq!(output_path, "reports");

    let reports_dir = temp_dir.path().join("reports");
    for name in [
        "instruments_successful.csv",
        "instruments_errors.csv",
        "instruments_failed.csv",
        "instruments_successful.json",
        "portfolios_successful.csv",
        "portfolios_errors.json",
        "manifest.json",
    ] {
        assert!(reports_dir.join(name).exists(), "missing {name}");
    }
    assert!(!reports_dir.join("portfolios_failed.csv").exists());

    let successful = std::fs::read_to_string(reports_dir.join("instruments_successful.csv"))?;
    assert_eq!(successful, "successful items\nimd_1\nimd_2\n");

    let errors = std::fs::read_to_string(reports_dir.join("instruments_errors.csv"))?;
    assert_eq!(errors, "error_items,status\nBad Request,400\n");

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(reports_dir.join("manifest.json"))?)?;
    assert_eq!(manifest["source"], "load.json");
    assert_eq!(manifest["entries"][0]["category"], "instruments");
    assert_eq!(manifest["entries"][0]["failed"], 1);
    assert_eq!(manifest["entries"][1]["category"], "portfolios");
    assert!(manifest["entries"][1]["failed"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_report_bundles_zip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_input(&temp_dir, &load_response()).await?;

    let mut config = TestConfig::new(&["tsv"]);
    config.archive_name = Some("load_report.zip".to_string());
    config.categories = vec![FileType::Portfolios];

    let pipeline = ReportPipeline::new(storage_for(&temp_dir), config);
    let output_path = ReportEngine::new(pipeline).run().await?;
    assert_eq!(output_path, "reports/load_report.zip");

    let zip_data = std::fs::read(temp_dir.path().join("reports/load_report.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;

    let mut file_names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    file_names.sort();
    assert_eq!(
        file_names,
        vec!["manifest.json", "portfolios_errors.tsv", "portfolios_successful.tsv"]
    );

    let mut content = String::new();
    archive
        .by_name("portfolios_successful.tsv")?
        .read_to_string(&mut content)?;
    assert_eq!(content, "successful items\nP1\n");

    Ok(())
}

#[tokio::test]
async fn test_single_response_mode() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let holdings = json!({
        "version": {"asAtDate": "2024-01-01"},
        "values": [
            {"instrument_uid": "LUID_XQ6VSO8F", "units": 137088.0, "cost": {"amount": 549997.05, "currency": "GBP"}},
            {"instrument_uid": "LUID_123", "units": 1372228.0, "cost": {"amount": 12345.05, "currency": "GBP"}}
        ]
    });
    write_input(&temp_dir, &holdings).await?;

    let mut config = TestConfig::new(&["csv"]);
    config.single = true;

    let pipeline = ReportPipeline::new(storage_for(&temp_dir), config);
    ReportEngine::new(pipeline).run().await?;

    let csv = std::fs::read_to_string(temp_dir.path().join("reports/response.csv"))?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "instrument_uid,units,cost.amount,cost.currency");
    assert_eq!(lines[1], "LUID_XQ6VSO8F,137088.0,549997.05,GBP");
    assert_eq!(lines.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_contract_violation_stops_before_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_input(&temp_dir, &json!({"instruments": {"success": []}})).await?;

    let pipeline = ReportPipeline::new(storage_for(&temp_dir), TestConfig::new(&["csv"]));
    let err = ReportEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, ReportError::MissingKeyError { .. }));
    assert!(!temp_dir.path().join("reports").exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let pipeline = ReportPipeline::new(storage_for(&temp_dir), TestConfig::new(&["csv"]));

    let err = ReportEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, ReportError::IoError(_)));

    Ok(())
}
