use std::fs;
use std::path::Path;

use crate::domain::model::Opportunity;
use crate::utils::error::Result;

/// Load the opportunity dataset for templating.
///
/// An absent file is a normal state (first build before any scrape run) and
/// yields an empty list. A present but malformed file is a build-input
/// defect: the parse error propagates and aborts the build rather than
/// silently publishing an empty site.
pub fn load_opportunities(data_file: &Path) -> Result<Vec<Opportunity>> {
    match fs::read(data_file) {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let loaded = load_opportunities(&dir.path().join("opportunities.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_valid_file_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opportunities.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"[{"title": "T", "deadline": "2099-01-01"}]"#)
            .unwrap();

        let loaded = load_opportunities(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].deadline.as_deref(), Some("2099-01-01"));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opportunities.json");
        fs::write(&path, b"{ definitely not json").unwrap();

        assert!(load_opportunities(&path).is_err());
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opportunities.json");
        fs::write(
            &path,
            br#"[{"title": "T", "region": "North America", "organisation": "FIJ"}]"#,
        )
        .unwrap();

        let loaded = load_opportunities(&path).unwrap();
        assert_eq!(
            loaded[0].extra.get("region").and_then(|v| v.as_str()),
            Some("North America")
        );
    }
}
