//! Output format value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an answer is written to the terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown rendered with ANSI styling and code highlighting (default)
    #[default]
    Rendered,
    /// The answer text exactly as returned
    Raw,
    /// The exchange as a JSON object
    Json,
}

impl FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rendered" => Ok(Self::Rendered),
            "raw" => Ok(Self::Raw),
            "json" => Ok(Self::Json),
            other => Err(DomainError::InvalidOutputFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rendered() {
        assert_eq!(OutputFormat::default(), OutputFormat::Rendered);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Raw).unwrap();
        assert_eq!(json, "\"raw\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("RAW".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
