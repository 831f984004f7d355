//! Report export.
//!
//! Writes the originally fetched document back out as pretty-printed JSON
//! (two-space indentation). No transformation: a round-trip parse of the
//! written file equals the fetched value.

use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Default export filename, matching what the comparator publishes
pub const DEFAULT_EXPORT_PATH: &str = "comparison_result.json";

/// Write the raw report document to `path` as indented JSON
pub fn export_report(raw: &Value, path: &Path) -> std::io::Result<()> {
    debug!("exporting report to {:?}", path);
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, raw)?;
    file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_round_trips_exactly() {
        let raw = json!({
            "metadata": {
                "comparison_date": "2024-06-01T10:00:00",
                "summary": { "newly_added_count": 2 }
            },
            "newly_added_products": [
                { "brand": "Acme", "product_name": "Soap", "wholesale_price_for_you": "1250" }
            ],
            "unmodeled": [1, 2.5, null, "x"]
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_PATH);
        export_report(&raw, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let reparsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed, raw);
    }

    #[test]
    fn test_export_uses_two_space_indent() {
        let raw = json!({ "a": { "b": 1 } });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_report(&raw, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("  \"a\""));
        assert!(written.contains("    \"b\""));
    }
}
