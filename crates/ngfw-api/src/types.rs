//! Shared API type definitions
//!
//! The configuration-phase selector and the tag wire pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the two-phase configuration model a read should project.
///
/// The management API keeps a mutable *candidate* configuration alongside
/// the deployed *running* configuration. Mutations always target candidate;
/// data-source reads may ask for either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigPhase {
    /// The editable configuration.
    Candidate,
    /// The deployed configuration.
    Running,
    /// No explicit phase requested; treated as candidate.
    #[default]
    Unspecified,
}

impl ConfigPhase {
    /// Get the string representation used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigPhase::Candidate => "candidate",
            ConfigPhase::Running => "running",
            ConfigPhase::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for ConfigPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigPhase {
    type Err = ParseConfigPhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(ConfigPhase::Candidate),
            "running" => Ok(ConfigPhase::Running),
            "unspecified" | "" => Ok(ConfigPhase::Unspecified),
            _ => Err(ParseConfigPhaseError(s.to_string())),
        }
    }
}

/// Error parsing a configuration phase from a string.
#[derive(Debug, Clone)]
pub struct ParseConfigPhaseError(String);

impl fmt::Display for ParseConfigPhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid config phase '{}', expected one of: candidate, running, unspecified",
            self.0
        )
    }
}

impl std::error::Error for ParseConfigPhaseError {}

/// One tag as the API carries it: an unordered list of key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Create a new tag pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_round_trip() {
        for phase in [
            ConfigPhase::Candidate,
            ConfigPhase::Running,
            ConfigPhase::Unspecified,
        ] {
            let parsed: ConfigPhase = phase.as_str().parse().unwrap();
            assert_eq!(parsed, phase);
        }
    }

    #[test]
    fn test_phase_parse_empty() {
        let parsed: ConfigPhase = "".parse().unwrap();
        assert_eq!(parsed, ConfigPhase::Unspecified);
    }

    #[test]
    fn test_phase_parse_invalid() {
        let err = "deployed".parse::<ConfigPhase>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config phase 'deployed', expected one of: candidate, running, unspecified"
        );
    }

    #[test]
    fn test_phase_default() {
        assert_eq!(ConfigPhase::default(), ConfigPhase::Unspecified);
    }

    #[test]
    fn test_tag_serialization() {
        let tag = Tag::new("env", "prod");
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#"{"key":"env","value":"prod"}"#);
    }
}
