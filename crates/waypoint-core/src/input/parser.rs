//! Input file parser with shape validation.
//!
//! The engine itself accepts any [`ProtocolInput`] and never fails. This
//! module is the caller-side gate that guarantees the shape the engine
//! expects before generation:
//! - At least one node, each with a non-blank name.
//! - `timeline.days` is at least 1.
//! - `timeline.targetDate` is an ISO `YYYY-MM-DD` date.

use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use super::ProtocolInput;

/// Errors that can occur while loading and validating input.
#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input file {path:?}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported input file extension for {path:?} (expected .toml or .json)")]
    UnsupportedFormat { path: String },

    #[error("input must contain at least one node")]
    NoNodes,

    #[error("node at position {index} has an empty name")]
    EmptyNodeName { index: usize },

    #[error("timeline.days must be at least 1, got {0}")]
    NonPositiveDays(i64),

    #[error("timeline.targetDate {value:?} is not an ISO date (expected YYYY-MM-DD)")]
    InvalidTargetDate { value: String },
}

/// Parse and validate a TOML input document.
pub fn parse_input_toml(content: &str) -> Result<ProtocolInput, InputParseError> {
    let input: ProtocolInput = toml::from_str(content)?;
    validate_input(&input)?;
    Ok(input)
}

/// Parse and validate a JSON input document.
pub fn parse_input_json(content: &str) -> Result<ProtocolInput, InputParseError> {
    let input: ProtocolInput = serde_json::from_str(content)?;
    validate_input(&input)?;
    Ok(input)
}

/// Read an input file, choosing the format from its extension.
pub fn load_input(path: &Path) -> Result<ProtocolInput, InputParseError> {
    let display = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<ProtocolInput, InputParseError> = match extension.as_deref() {
        Some("toml") => parse_input_toml,
        Some("json") => parse_input_json,
        _ => return Err(InputParseError::UnsupportedFormat { path: display }),
    };

    let content = std::fs::read_to_string(path).map_err(|e| InputParseError::Io {
        path: display,
        source: e,
    })?;
    parse(&content)
}

/// Check the shape guarantees listed in the module docs.
pub fn validate_input(input: &ProtocolInput) -> Result<(), InputParseError> {
    if input.nodes.is_empty() {
        return Err(InputParseError::NoNodes);
    }

    if let Some(index) = input.nodes.iter().position(|n| n.name.trim().is_empty()) {
        return Err(InputParseError::EmptyNodeName { index });
    }

    if input.timeline.days < 1 {
        return Err(InputParseError::NonPositiveDays(input.timeline.days));
    }

    if NaiveDate::parse_from_str(&input.timeline.target_date, "%Y-%m-%d").is_err() {
        return Err(InputParseError::InvalidTargetDate {
            value: input.timeline.target_date.clone(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID_TOML: &str = r#"
structure = "family-divorce"
currentState = "transition"
stakeholders = ["School Counselor"]

[timeline]
days = 90
targetDate = "2025-06-01"

[[nodes]]
name = "Alex"
role = "Parent"
os = "emotional"

[[nodes]]
name = "Sam"
role = "Child"
age = 8
os = "practical"
"#;

    #[test]
    fn parse_valid_toml() {
        let input = parse_input_toml(VALID_TOML).unwrap();
        assert_eq!(input.nodes.len(), 2);
        assert_eq!(input.nodes[1].age, Some(8));
        assert_eq!(input.stakeholders, vec!["School Counselor"]);
    }

    #[test]
    fn rejects_empty_nodes() {
        let content = r#"
structure = "self"
nodes = []

[timeline]
days = 10
targetDate = "2025-01-10"
"#;
        assert!(matches!(
            parse_input_toml(content),
            Err(InputParseError::NoNodes)
        ));
    }

    #[test]
    fn rejects_blank_node_name() {
        let content = VALID_TOML.replace("name = \"Sam\"", "name = \"  \"");
        assert!(matches!(
            parse_input_toml(&content),
            Err(InputParseError::EmptyNodeName { index: 1 })
        ));
    }

    #[test]
    fn rejects_zero_days() {
        let content = VALID_TOML.replace("days = 90", "days = 0");
        assert!(matches!(
            parse_input_toml(&content),
            Err(InputParseError::NonPositiveDays(0))
        ));
    }

    #[test]
    fn rejects_bad_target_date() {
        let content = VALID_TOML.replace("2025-06-01", "June 1st");
        let err = parse_input_toml(&content).unwrap_err();
        assert!(matches!(err, InputParseError::InvalidTargetDate { .. }));
        assert!(err.to_string().contains("June 1st"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_input_json("{ not json"),
            Err(InputParseError::Json(_))
        ));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("input.toml");
        std::fs::write(&toml_path, VALID_TOML).unwrap();
        let from_toml = load_input(&toml_path).unwrap();

        let json_path = dir.path().join("input.JSON");
        std::fs::write(&json_path, serde_json::to_string(&from_toml).unwrap()).unwrap();
        let from_json = load_input(&json_path).unwrap();

        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.yaml");
        std::fs::write(&path, "structure: self").unwrap();
        assert!(matches!(
            load_input(&path),
            Err(InputParseError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(matches!(
            load_input(Path::new("/nonexistent/input.toml")),
            Err(InputParseError::Io { .. })
        ));
    }
}
