//! Field-type registry: binds each field-type name to its immutable rule.
//!
//! A registry is built once, before any values are validated, and is never
//! mutated afterwards. Rules are shared by reference, so a registry can be
//! used from many threads without synchronization.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use camt_model::{
    AmountRule, CodeRule, CurrencyCode, DecimalRule, FieldError, FieldInput, FieldValue,
    TemporalConfig, TemporalRule,
};
use camt_standards::CodeSetProvider;

// =============================================================================
// RULES
// =============================================================================

/// Field family of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    Amount,
    Currency,
    Code,
    Temporal,
    Decimal,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Currency => "currency",
            Self::Code => "code",
            Self::Temporal => "temporal",
            Self::Decimal => "decimal",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable rule of a registered field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    Amount(AmountRule),
    /// Currency code, validated by shape.
    Currency,
    Code(CodeRule),
    Temporal(TemporalRule),
    Decimal(DecimalRule),
}

impl FieldRule {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Amount(_) => FieldKind::Amount,
            Self::Currency => FieldKind::Currency,
            Self::Code(_) => FieldKind::Code,
            Self::Temporal(_) => FieldKind::Temporal,
            Self::Decimal(_) => FieldKind::Decimal,
        }
    }

    /// One-line summary of the rule for listings.
    pub fn describe(&self) -> String {
        match self {
            Self::Amount(rule) => match rule.scale_rule() {
                camt_model::ScaleRule::MinorUnit => "ISO 4217 minor unit".to_string(),
                camt_model::ScaleRule::Fixed(scale) => format!("{scale} decimal places"),
            },
            Self::Currency => "[A-Z]{3}".to_string(),
            Self::Code(rule) => format!("{}: {}", rule.strategy(), rule.constraint().describe()),
            Self::Temporal(rule) => rule.directive().to_string(),
            Self::Decimal(_) => "bounded decimal".to_string(),
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Immutable mapping from field-type name to rule.
#[derive(Debug, Clone, Default)]
pub struct FieldTypeRegistry {
    rules: BTreeMap<String, Arc<FieldRule>>,
    temporal: TemporalConfig,
}

impl FieldTypeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name).map(AsRef::as_ref)
    }

    /// Rule for `name`.
    ///
    /// # Errors
    ///
    /// `Configuration` when no such field type is registered.
    pub fn rule(&self, name: &str) -> camt_model::Result<&FieldRule> {
        self.get(name).ok_or_else(|| {
            tracing::error!(field = name, "unknown field type");
            FieldError::configuration(name, "no such field type is registered")
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Registered names and rules, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules
            .iter()
            .map(|(name, rule)| (name.as_str(), rule.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn temporal_config(&self) -> &TemporalConfig {
        &self.temporal
    }

    /// Validate a raw value as field type `name`.
    ///
    /// # Errors
    ///
    /// `Configuration` for an unknown name, `InvalidType` when the input kind
    /// does not fit the field family, otherwise whatever the rule reports.
    pub fn validate(
        &self,
        name: &str,
        input: impl Into<FieldInput>,
    ) -> camt_model::Result<FieldValue> {
        let input = input.into();
        let invalid_type = |expected: &'static str| {
            tracing::debug!(field = name, actual = input.kind(), "input of wrong kind");
            FieldError::InvalidType {
                field: name.to_string(),
                expected,
                actual: input.kind(),
            }
        };

        match self.rule(name)? {
            FieldRule::Amount(rule) => match &input {
                FieldInput::Amount(request) => rule
                    .normalize(request.value.clone(), &request.currency, request.options)
                    .map(FieldValue::Amount),
                _ => Err(invalid_type("an amount with currency")),
            },
            FieldRule::Currency => match input.as_text() {
                Some(text) => CurrencyCode::for_field(name, text).map(FieldValue::Currency),
                None => Err(invalid_type("text")),
            },
            FieldRule::Code(rule) => match input.as_text() {
                Some(text) => rule.validate(text).map(FieldValue::Code),
                None => Err(invalid_type("text")),
            },
            FieldRule::Temporal(rule) => match input.to_temporal() {
                Some(temporal) => rule
                    .normalize(&self.temporal, temporal)
                    .map(FieldValue::Temporal),
                None => Err(invalid_type("text, a date or a date-time")),
            },
            FieldRule::Decimal(rule) => match input.to_number() {
                Some(number) => rule.validate(number).map(FieldValue::Decimal),
                None => Err(invalid_type("a number")),
            },
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Collects rules, then freezes them into a [`FieldTypeRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: BTreeMap<String, Arc<FieldRule>>,
    duplicates: Vec<String>,
    temporal: TemporalConfig,
}

impl RegistryBuilder {
    /// Zones used by every temporal field type.
    #[must_use]
    pub fn temporal_config(mut self, config: TemporalConfig) -> Self {
        self.temporal = config;
        self
    }

    /// Register a rule under `name`.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        let name = name.into();
        if self.rules.insert(name.clone(), Arc::new(rule)).is_some() {
            self.duplicates.push(name);
        }
        self
    }

    #[must_use]
    pub fn amount(self, rule: AmountRule) -> Self {
        let name = rule.field_type().to_string();
        self.rule(name, FieldRule::Amount(rule))
    }

    #[must_use]
    pub fn currency(self, name: impl Into<String>) -> Self {
        self.rule(name, FieldRule::Currency)
    }

    #[must_use]
    pub fn code(self, rule: CodeRule) -> Self {
        let name = rule.field_type().to_string();
        self.rule(name, FieldRule::Code(rule))
    }

    #[must_use]
    pub fn temporal(self, rule: TemporalRule) -> Self {
        let name = rule.field_type().to_string();
        self.rule(name, FieldRule::Temporal(rule))
    }

    #[must_use]
    pub fn decimal(self, rule: DecimalRule) -> Self {
        let name = rule.field_type().to_string();
        self.rule(name, FieldRule::Decimal(rule))
    }

    /// Register a regex-constrained code type.
    pub fn pattern(self, name: &str, pattern: &str) -> camt_model::Result<Self> {
        Ok(self.code(CodeRule::pattern(name, pattern)?))
    }

    /// Register a temporal type by directive name (e.g. `YYYY-MM-DD`).
    pub fn temporal_format(self, name: &str, format: &str) -> camt_model::Result<Self> {
        Ok(self.temporal(TemporalRule::from_format(name, format)?))
    }

    /// Register an external code type resolved through `provider`.
    pub fn external(self, provider: &CodeSetProvider, name: &str) -> camt_model::Result<Self> {
        let rule = provider.code_rule(name).inspect_err(|e| {
            tracing::error!(field = name, error = %e, "cannot set up external code set");
        })?;
        Ok(self.code(rule))
    }

    /// Freeze the registry.
    ///
    /// # Errors
    ///
    /// `Configuration` if a name was registered twice.
    pub fn build(self) -> camt_model::Result<FieldTypeRegistry> {
        if let Some(name) = self.duplicates.first() {
            return Err(FieldError::configuration(
                name.as_str(),
                "field type registered more than once",
            ));
        }
        tracing::debug!(field_types = self.rules.len(), "built field-type registry");
        Ok(FieldTypeRegistry {
            rules: self.rules,
            temporal: self.temporal,
        })
    }
}

#[cfg(test)]
mod tests {
    use camt_model::{AmountOptions, AmountRequest, Directive, FieldErrorKind, ZoneSetting};

    use super::*;

    fn registry() -> FieldTypeRegistry {
        FieldTypeRegistry::builder()
            .temporal_config(TemporalConfig::uniform(ZoneSetting::Utc))
            .amount(AmountRule::minor_unit("ActiveCurrencyAndAmount"))
            .currency("ActiveCurrencyCode")
            .code(CodeRule::enumeration("CreditDebitCode", ["CRDT", "DBIT"]))
            .temporal(TemporalRule::new("ISODate", Directive::Date))
            .decimal(DecimalRule::percentage_rate("PercentageRate"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_dispatch_by_kind() {
        let registry = registry();
        let amount = registry
            .validate(
                "ActiveCurrencyAndAmount",
                AmountRequest::new("12.345", "EUR").with_options(AmountOptions::default()),
            )
            .unwrap();
        assert_eq!(amount.text(), "12.35");
        assert_eq!(registry.validate("ActiveCurrencyCode", "CHF").unwrap().text(), "CHF");
        assert_eq!(registry.validate("CreditDebitCode", "dbit").unwrap().text(), "DBIT");
        assert_eq!(registry.validate("ISODate", "2024-02-29").unwrap().text(), "2024-02-29");
        assert_eq!(registry.validate("PercentageRate", 12.5).unwrap().text(), "12.5");
    }

    #[test]
    fn test_wrong_input_kind() {
        let registry = registry();
        let err = registry.validate("CreditDebitCode", 42_i64).unwrap_err();
        assert_eq!(err.kind(), FieldErrorKind::InvalidType);
        assert_eq!(err.to_string(), "CreditDebitCode must be text, got integer");
        let err = registry.validate("ActiveCurrencyAndAmount", "12.00").unwrap_err();
        assert_eq!(err.kind(), FieldErrorKind::InvalidType);
    }

    #[test]
    fn test_unknown_type() {
        let err = registry().validate("NoSuchType", "x").unwrap_err();
        assert_eq!(err.kind(), FieldErrorKind::Configuration);
    }

    #[test]
    fn test_duplicate_registration() {
        let err = FieldTypeRegistry::builder()
            .currency("ActiveCurrencyCode")
            .currency("ActiveCurrencyCode")
            .build()
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_describe() {
        let registry = registry();
        assert_eq!(
            registry.rule("CreditDebitCode").unwrap().describe(),
            "enumeration: CRDT, DBIT"
        );
        assert_eq!(registry.rule("ISODate").unwrap().describe(), "YYYY-MM-DD");
        assert_eq!(registry.rule("ISODate").unwrap().kind(), FieldKind::Temporal);
    }
}
