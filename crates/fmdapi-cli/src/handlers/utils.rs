//! Shared utilities for command handlers

use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Path argument that stands for stdin
const STDIN_PATH: &str = "-";

/// Read a JSON or YAML document from a file, or from stdin when the path is `-`
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
/// Stdin is tried as JSON first and then as YAML.
pub fn read_document(path: &Path) -> Result<Value> {
    if path.as_os_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return parse_document(&content, path, DocumentFormat::Detect);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let format = if is_yaml_path(path) {
        DocumentFormat::Yaml
    } else {
        DocumentFormat::Json
    };
    parse_document(&content, path, format)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
    Detect,
}

fn parse_document(content: &str, path: &Path, format: DocumentFormat) -> Result<Value> {
    let invalid = |expected: &str| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: expected.to_string(),
    };

    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|_| invalid("JSON")),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|_| invalid("YAML")),
        DocumentFormat::Detect => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|_| invalid("JSON or YAML")),
    }
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Write command output to a file, creating parent directories
pub fn write_output(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_json_and_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("query.json");
        let yaml_path = dir.path().join("query.yml");
        fs::write(&json_path, r#"{"limit": 5}"#).unwrap();
        fs::write(&yaml_path, "limit: 5\nsort: name\n").unwrap();

        assert_eq!(read_document(&json_path).unwrap(), json!({"limit": 5}));
        assert_eq!(read_document(&yaml_path).unwrap(), json!({"limit": 5, "sort": "name"}));
    }

    #[test]
    fn test_invalid_document_reports_expected_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        match read_document(&path).unwrap_err() {
            Error::InvalidFormat { expected, .. } => assert_eq!(expected, "JSON"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_document() {
        let err = read_document(Path::new("/nonexistent/query.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_detect_falls_back_to_yaml() {
        let value = parse_document("limit: 3\n", Path::new("-"), DocumentFormat::Detect).unwrap();
        assert_eq!(value, json!({"limit": 3}));
    }

    #[test]
    fn test_write_output_appends_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("params.txt");
        write_output(&path, "_limit=5").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "_limit=5\n");
    }
}
