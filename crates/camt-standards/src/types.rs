//! Code-set document types.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, StandardsError};

/// Top level of an ISO 20022 external code-set document (JSON schema form).
///
/// Entries stay raw JSON until looked up, so a malformed entry only fails
/// its own field type.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeSetDocument {
    #[serde(default)]
    pub version: Option<String>,
    pub definitions: BTreeMap<String, Value>,
}

/// A single `definitions` entry as published.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefinition {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "enum")]
    pub codes: Option<Vec<String>>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub description: Option<String>,
}

impl RawDefinition {
    /// Read the entry for `name` from its JSON form.
    ///
    /// The declared `type` is checked before the rest of the entry, so a
    /// non-string code set reports `UnsupportedType` whatever its `enum` holds.
    pub fn from_value(name: &str, value: &Value) -> Result<Self> {
        let declared = match value.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => other.to_string(),
            None => "none".to_string(),
        };
        if declared != "string" {
            return Err(StandardsError::UnsupportedType {
                name: name.to_string(),
                declared,
            });
        }
        Self::deserialize(value).map_err(|source| StandardsError::MalformedDefinition {
            name: name.to_string(),
            source,
        })
    }

    /// Resolve to an enumeration or a length range.
    ///
    /// An explicit enumeration wins over a length range.
    pub fn resolve(&self, name: &str) -> Result<CodeSetDefinition> {
        let kind = self.kind.as_deref().unwrap_or("none");
        if kind != "string" {
            return Err(StandardsError::UnsupportedType {
                name: name.to_string(),
                declared: kind.to_string(),
            });
        }
        if let Some(codes) = self.codes.as_ref().filter(|codes| !codes.is_empty()) {
            return Ok(CodeSetDefinition::Enumeration(codes.iter().cloned().collect()));
        }
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(StandardsError::InvalidLengthRange {
                name: name.to_string(),
                min,
                max,
            }),
            (Some(min), Some(max)) => Ok(CodeSetDefinition::LengthRange { min, max }),
            _ => Err(StandardsError::MissingConstraint {
                name: name.to_string(),
            }),
        }
    }
}

/// What an external code-set entry accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSetDefinition {
    Enumeration(BTreeSet<String>),
    LengthRange { min: u32, max: u32 },
}

impl CodeSetDefinition {
    /// Number of listed codes; zero for a length range.
    pub fn code_count(&self) -> usize {
        match self {
            Self::Enumeration(codes) => codes.len(),
            Self::LengthRange { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawDefinition {
        serde_json::from_str(json).unwrap()
    }

    fn from_json(json: &str) -> Result<RawDefinition> {
        let value: Value = serde_json::from_str(json).unwrap();
        RawDefinition::from_value("X", &value)
    }

    #[test]
    fn test_enumeration_wins_over_length() {
        let def = raw(r#"{"type": "string", "minLength": 1, "maxLength": 4, "enum": ["BOOK", "PDNG"]}"#);
        let resolved = def.resolve("ExternalEntryStatus1Code").unwrap();
        assert_eq!(resolved.code_count(), 2);
    }

    #[test]
    fn test_length_range() {
        let def = raw(r#"{"type": "string", "minLength": 1, "maxLength": 4}"#);
        assert_eq!(
            def.resolve("ExternalDocumentLineType1Code").unwrap(),
            CodeSetDefinition::LengthRange { min: 1, max: 4 }
        );
        let def = raw(r#"{"type": "string", "minLength": 1, "maxLength": 4, "enum": []}"#);
        assert!(matches!(
            def.resolve("Empty").unwrap(),
            CodeSetDefinition::LengthRange { .. }
        ));
    }

    #[test]
    fn test_rejected_definitions() {
        let err = raw(r#"{"type": "number"}"#).resolve("X").unwrap_err();
        assert!(matches!(err, StandardsError::UnsupportedType { .. }));
        let err = raw(r#"{"enum": ["A"]}"#).resolve("X").unwrap_err();
        assert!(matches!(err, StandardsError::UnsupportedType { .. }));
        let err = raw(r#"{"type": "string", "minLength": 2}"#).resolve("X").unwrap_err();
        assert!(matches!(err, StandardsError::MissingConstraint { .. }));
        let err = raw(r#"{"type": "string", "minLength": 5, "maxLength": 2}"#)
            .resolve("X")
            .unwrap_err();
        assert!(matches!(err, StandardsError::InvalidLengthRange { .. }));
    }

    #[test]
    fn test_malformed_entries() {
        assert!(matches!(
            from_json(r#"{"type": "integer", "enum": [1, 2]}"#).unwrap_err(),
            StandardsError::UnsupportedType { declared, .. } if declared == "integer"
        ));
        assert!(matches!(
            from_json(r#"{"type": 7}"#).unwrap_err(),
            StandardsError::UnsupportedType { declared, .. } if declared == "7"
        ));
        assert!(matches!(
            from_json(r#"{"enum": ["A"]}"#).unwrap_err(),
            StandardsError::UnsupportedType { .. }
        ));
        assert!(matches!(
            from_json(r#"{"type": "string", "enum": ["A", 2]}"#).unwrap_err(),
            StandardsError::MalformedDefinition { .. }
        ));
        assert!(matches!(
            from_json(r#"{"type": "string", "minLength": "one", "maxLength": 4}"#).unwrap_err(),
            StandardsError::MalformedDefinition { .. }
        ));
        assert!(from_json(r#"{"type": "string", "enum": ["A"]}"#).is_ok());
    }
}
