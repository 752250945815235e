//! Code validation: fixed enumerations, regex patterns and external code sets.
//!
//! The strategy is fixed per field type when its [`CodeRule`] is built.
//!
//! - **Enumeration** and **External** inputs are trimmed and upper-cased
//!   before comparison.
//! - **Pattern** inputs are checked as-is; case is part of the pattern (e.g.
//!   `ISO2ALanguageCode` only accepts lowercase).

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use crate::error::{FieldError, Result};
use crate::patterns;

/// A fixed set of accepted codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeEnumeration {
    codes: BTreeSet<String>,
}

impl CodeEnumeration {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Accepted codes joined for error messages.
    pub fn allowed(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

/// A compiled, fully anchored pattern.
#[derive(Debug, Clone)]
pub struct CodePattern {
    source: String,
    regex: Regex,
}

impl CodePattern {
    /// Compile `source` so that it must match the whole input.
    pub fn new(field: &str, source: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{source})$"))
            .map_err(|e| FieldError::configuration(field, format!("invalid pattern: {e}")))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as published, without anchors.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for CodePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CodePattern {}

/// External code set as resolved from the code-set document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalCodes {
    /// The document lists the codes explicitly.
    Enumeration(CodeEnumeration),
    /// Only a length range is published; any uppercase code of that length.
    LengthRange {
        min: u32,
        max: u32,
        pattern: CodePattern,
    },
}

/// The accepted set of a code field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeConstraint {
    Enumeration(CodeEnumeration),
    Pattern(CodePattern),
    External(ExternalCodes),
}

/// Which of the three strategies a constraint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStrategy {
    Enumeration,
    Pattern,
    External,
}

impl CodeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enumeration => "enumeration",
            Self::Pattern => "pattern",
            Self::External => "external",
        }
    }
}

impl fmt::Display for CodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CodeConstraint {
    pub fn strategy(&self) -> CodeStrategy {
        match self {
            Self::Enumeration(_) => CodeStrategy::Enumeration,
            Self::Pattern(_) => CodeStrategy::Pattern,
            Self::External(_) => CodeStrategy::External,
        }
    }

    /// Human-readable description of what the constraint accepts.
    pub fn describe(&self) -> String {
        match self {
            Self::Enumeration(codes) | Self::External(ExternalCodes::Enumeration(codes)) => {
                codes.allowed()
            }
            Self::Pattern(pattern) | Self::External(ExternalCodes::LengthRange { pattern, .. }) => {
                format!("pattern `{}`", pattern.source())
            }
        }
    }
}

/// Immutable configuration of a code field type.
///
/// # Example
///
/// ```
/// use camt_model::CodeRule;
///
/// let rule = CodeRule::enumeration("CreditDebitCode", ["CRDT", "DBIT"]);
/// assert_eq!(rule.validate(" crdt ").unwrap().code(), "CRDT");
/// assert!(rule.validate("CRED").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRule {
    field_type: Arc<str>,
    constraint: Arc<CodeConstraint>,
}

impl CodeRule {
    pub fn new(field_type: impl Into<Arc<str>>, constraint: CodeConstraint) -> Self {
        let field_type = field_type.into();
        if let CodeConstraint::Enumeration(codes)
        | CodeConstraint::External(ExternalCodes::Enumeration(codes)) = &constraint
            && codes.is_empty()
        {
            tracing::warn!(field = %field_type, "code field type accepts no codes");
        }
        Self {
            field_type,
            constraint: Arc::new(constraint),
        }
    }

    /// Fixed enumeration strategy.
    pub fn enumeration<I, S>(field_type: impl Into<Arc<str>>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            field_type,
            CodeConstraint::Enumeration(CodeEnumeration::new(codes)),
        )
    }

    /// Regex strategy. Fails if `source` does not compile.
    pub fn pattern(field_type: impl Into<Arc<str>>, source: &str) -> Result<Self> {
        let field_type = field_type.into();
        let pattern = CodePattern::new(&field_type, source)?;
        Ok(Self::new(field_type, CodeConstraint::Pattern(pattern)))
    }

    /// External strategy backed by an explicit code list.
    pub fn external_codes<I, S>(field_type: impl Into<Arc<str>>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            field_type,
            CodeConstraint::External(ExternalCodes::Enumeration(CodeEnumeration::new(codes))),
        )
    }

    /// External strategy backed by a published length range.
    pub fn external_length(field_type: impl Into<Arc<str>>, min: u32, max: u32) -> Result<Self> {
        let field_type = field_type.into();
        if min > max {
            return Err(FieldError::configuration(
                field_type.as_ref(),
                format!("minimum length {min} exceeds maximum length {max}"),
            ));
        }
        let pattern = CodePattern::new(&field_type, &patterns::uppercase_letters(min, max))?;
        Ok(Self::new(
            field_type,
            CodeConstraint::External(ExternalCodes::LengthRange { min, max, pattern }),
        ))
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn constraint(&self) -> &CodeConstraint {
        &self.constraint
    }

    pub fn strategy(&self) -> CodeStrategy {
        self.constraint.strategy()
    }

    /// Validate a raw code.
    ///
    /// # Errors
    ///
    /// `Membership` when an enumerated code is not listed, `Format` when a
    /// pattern does not match.
    pub fn validate(&self, raw: &str) -> Result<CodeValue> {
        let field = self.field_type.as_ref();
        let code = match self.constraint.as_ref() {
            CodeConstraint::Pattern(pattern) => {
                if !pattern.is_match(raw) {
                    tracing::debug!(field, "code does not match pattern");
                    return Err(FieldError::format(
                        field,
                        raw,
                        format!("does not match pattern `{}`", pattern.source()),
                    ));
                }
                raw.to_string()
            }
            CodeConstraint::Enumeration(codes)
            | CodeConstraint::External(ExternalCodes::Enumeration(codes)) => {
                let code = raw.trim().to_uppercase();
                if !codes.contains(&code) {
                    tracing::debug!(field, "code not in allowed set");
                    return Err(FieldError::Membership {
                        field: field.to_string(),
                        value: code,
                        allowed: codes.allowed(),
                    });
                }
                code
            }
            CodeConstraint::External(ExternalCodes::LengthRange { pattern, .. }) => {
                let code = raw.trim().to_uppercase();
                if !pattern.is_match(&code) {
                    tracing::debug!(field, "external code does not match length range");
                    return Err(FieldError::format(
                        field,
                        code,
                        format!("does not match pattern `{}`", pattern.source()),
                    ));
                }
                code
            }
        };

        Ok(CodeValue {
            raw: raw.to_string(),
            code,
            field_type: Arc::clone(&self.field_type),
            constraint: Arc::clone(&self.constraint),
        })
    }
}

/// A validated code. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeValue {
    raw: String,
    code: String,
    field_type: Arc<str>,
    constraint: Arc<CodeConstraint>,
}

impl CodeValue {
    /// Input exactly as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Resolved code, a member of the constraint's accepted set.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn constraint(&self) -> &CodeConstraint {
        &self.constraint
    }
}

impl fmt::Display for CodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
