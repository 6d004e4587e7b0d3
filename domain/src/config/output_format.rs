//! Output format value object

use serde::{Deserialize, Serialize};

/// How fan-out results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One bordered panel per provider with its answer or error (default)
    #[default]
    Panels,
    /// Answers only, one block per successful provider
    Answers,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_panels() {
        assert_eq!(OutputFormat::default(), OutputFormat::Panels);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Answers).unwrap();
        assert_eq!(json, "\"answers\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
