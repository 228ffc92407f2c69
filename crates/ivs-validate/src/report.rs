//! JSON artifact for the validation report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use ivs_model::{CheckResult, ValidationReport};

const REPORT_SCHEMA: &str = "ivs-pipeline.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct ValidationReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub failure_count: usize,
    pub checks: Vec<CheckResult>,
}

/// Writes the check battery results as pretty-printed JSON.
///
/// Creates the parent directory when needed and returns the written path.
pub fn write_report_json(path: &Path, report: &ValidationReport) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }

    let payload = ValidationReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        failure_count: report.failure_count(),
        checks: report.checks.clone(),
    };
    let json =
        serde_json::to_string_pretty(&payload).context("Failed to serialize validation report")?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Failed to write validation report to {}", path.display()))?;

    debug!(
        path = %path.display(),
        checks = report.checks.len(),
        "validation report written"
    );
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivs_model::{CheckStatus, checks};
    use tempfile::TempDir;

    fn sample_report() -> ValidationReport {
        ValidationReport {
            checks: vec![
                CheckResult {
                    name: checks::UNIQUE_RESPONDENT_IDS.to_string(),
                    status: CheckStatus::Pass,
                    column: Some("S007_01".to_string()),
                    message: "no duplicate respondent ids across 4 rows".to_string(),
                    count: Some(0),
                    share: None,
                },
                CheckResult {
                    name: checks::COUNTRY_COUNT.to_string(),
                    status: CheckStatus::Fail,
                    column: Some("S024".to_string()),
                    message: "2 distinct countries, expected between 3 and 5".to_string(),
                    count: Some(2),
                    share: None,
                },
            ],
        }
    }

    #[test]
    fn test_report_json_envelope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("ivs.validation.json");

        let written = write_report_json(&path, &sample_report()).unwrap();
        assert_eq!(written, path);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["schema"], "ivs-pipeline.validation-report");
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["failure_count"], 1);
        let entries = value["checks"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "pass");
        assert_eq!(entries[1]["status"], "fail");
    }
}
