/// Report loading
///
/// This module handles:
/// - The single HTTP GET for the published report
/// - Reading a report from a local file (offline runs and tests)
/// - Parsing the document into the typed model while keeping the raw
///   JSON value for byte-faithful export

use crate::model::{Category, Report};
use log::debug;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

const USER_AGENT: &str = "pricedash/0.1.0 (https://github.com/pricedash/pricedash)";

/// Location of the published comparison report
pub const DEFAULT_REPORT_URL: &str =
    "https://raw.githubusercontent.com/smhasnanmonir/tok-automation/refs/heads/main/results/comparison_result.json";

/// Why a report could not be loaded.
///
/// All variants are presented to the user the same way (a terminal
/// "failed to load" message); the distinction exists for logging only.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid report JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A parsed report plus the raw document it was parsed from
#[derive(Debug)]
pub struct LoadedReport {
    pub report: Report,
    pub raw: Value,
}

/// Fetch the report with a single GET. No retry, no custom timeout:
/// a failure here is terminal.
pub fn fetch_report(url: &str) -> Result<LoadedReport, LoadError> {
    debug!("fetching report from {}", url);

    let resp = ureq::get(url).set("User-Agent", USER_AGENT).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => LoadError::Status(code),
        ureq::Error::Transport(t) => LoadError::Transport(t.to_string()),
    })?;

    let body = resp.into_string()?;
    parse_document(&body)
}

/// Read a report from a local JSON file
pub fn read_report(path: &Path) -> Result<LoadedReport, LoadError> {
    debug!("reading report from {:?}", path);
    let body = std::fs::read_to_string(path)?;
    parse_document(&body)
}

fn parse_document(body: &str) -> Result<LoadedReport, LoadError> {
    let raw: Value = serde_json::from_str(body)?;
    let report: Report = serde_json::from_value(raw.clone())?;

    // Counts are advisory; a mismatch renders as-is but is worth a trace
    for category in Category::ALL {
        let declared = report.metadata.summary.count(category);
        let actual = report.products(category).len() as u64;
        if declared != actual {
            debug!("{:?} count mismatch: summary says {}, list has {}", category, declared, actual);
        }
    }

    debug!("loaded report with {} products across categories", report.total_products());

    Ok(LoadedReport { report, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_document_keeps_raw_value() {
        let body = r#"{
            "metadata": {
                "comparison_date": "2024-06-01T10:00:00",
                "old_pdf": "a.pdf",
                "new_pdf": "b.pdf",
                "summary": {}
            },
            "newly_added_products": [],
            "extra_field_we_do_not_model": {"kept": true}
        }"#;

        let loaded = parse_document(body).unwrap();
        // Unmodeled fields survive in the raw value for export
        assert_eq!(loaded.raw["extra_field_we_do_not_model"]["kept"], serde_json::json!(true));
        assert!(loaded.report.newly_added_products.is_empty());
    }

    #[test]
    fn test_parse_document_rejects_garbage() {
        let err = parse_document("not json at all").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_read_report_missing_file_is_io_error() {
        let err = read_report(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_read_report_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "metadata": {{
                    "comparison_date": "2024-06-01T10:00:00",
                    "old_pdf": "a.pdf",
                    "new_pdf": "b.pdf",
                    "summary": {{ "stock_out_count": 1 }}
                }},
                "stock_out_products": [
                    {{ "brand": "Acme", "product_name": "Soap", "wholesale_price_for_you": "950" }}
                ]
            }}"#
        )
        .unwrap();

        let loaded = read_report(file.path()).unwrap();
        assert_eq!(loaded.report.stock_out_products.len(), 1);
        assert_eq!(loaded.report.metadata.summary.stock_out_count, 1);
    }
}
