//! CAMT.053.001.09 field-type catalog.
//!
//! Binds the ISO 20022 datatype names used by bank-to-customer statements to
//! their rules. External code types are resolved through a
//! [`CodeSetProvider`]; a type the document does not define is left out.

use camt_model::{
    AmountRule, CodeRule, DecimalRule, Directive, TemporalConfig, TemporalRule, patterns,
};
use camt_standards::{CodeSetProvider, StandardsError};

use crate::config::NormalizationConfig;
use crate::error::Result;
use crate::registry::{FieldTypeRegistry, RegistryBuilder};

// =============================================================================
// AMOUNTS AND CURRENCIES
// =============================================================================

/// Amount types whose scale follows the ISO 4217 minor unit.
pub const MINOR_UNIT_AMOUNTS: [&str; 3] = [
    "ActiveCurrencyAndAmount",
    "ActiveOrHistoricCurrencyAndAmount",
    "ImpliedCurrencyAndAmount",
];

/// Amount type with 13 fraction digits, regardless of currency.
pub const THIRTEEN_DECIMAL_AMOUNT: &str = "ActiveOrHistoricCurrencyAnd13DecimalAmount";

pub const CURRENCY_CODES: [&str; 2] = ["ActiveCurrencyCode", "ActiveOrHistoricCurrencyCode"];

// =============================================================================
// ENUMERATIONS
// =============================================================================

const ENUMERATIONS: &[(&str, &[&str])] = &[
    (
        "AddressType2Code",
        &["ADDR", "PBOX", "HOME", "BIZZ", "MLTO", "DLVY"],
    ),
    ("ChargeBearerType1Code", &["DEBT", "CRED", "SHAR", "SLEV"]),
    ("CopyDuplicate1Code", &["CODU", "COPY", "DUPL"]),
    ("CreditDebitCode", &["CRDT", "DBIT"]),
    (
        "DocumentType3Code",
        &["RADM", "RPIN", "FXDR", "DISP", "PUOR", "SCOR"],
    ),
    (
        "DocumentType6Code",
        &[
            "MSIN", "CNFA", "DNFA", "CINV", "CREN", "DEBN", "HIRI", "SBIN", "CMCN", "SOAC", "DISP",
            "BOLD", "VCHR", "AROI", "TSUT", "PUOR",
        ],
    ),
    (
        "Frequency6Code",
        &[
            "YEAR", "MNTH", "QURT", "MIAN", "WEEK", "DAIL", "ADHO", "INDA", "FRTN",
        ],
    ),
    ("InterestType1Code", &["INDY", "OVRN"]),
    ("NamePrefix2Code", &["DOCT", "MADM", "MISS", "MIST", "MIKS"]),
    (
        "PreferredContactMethod1Code",
        &["LETT", "MAIL", "PHON", "FAXX", "CELL"],
    ),
    (
        "RemittanceLocationMethod2Code",
        &["FAXI", "EDIC", "URID", "EMAL", "POST", "SMSM"],
    ),
    (
        "TaxRecordPeriod1Code",
        &[
            "MM01", "MM02", "MM03", "MM04", "MM05", "MM06", "MM07", "MM08", "MM09", "MM10", "MM11",
            "MM12", "QTR1", "QTR2", "QTR3", "QTR4", "HLF1", "HLF2",
        ],
    ),
];

// =============================================================================
// PATTERNS
// =============================================================================

const PATTERNS: &[(&str, &str)] = &[
    ("AnyBICDec2014Identifier", patterns::BIC_DEC2014_IDENTIFIER),
    ("BICFIDec2014Identifier", patterns::BIC_DEC2014_IDENTIFIER),
    ("CountryCode", patterns::COUNTRY_CODE),
    ("Exact4AlphaNumericText", patterns::EXACT4_ALPHANUMERIC_TEXT),
    ("IBAN2007Identifier", patterns::IBAN_2007_IDENTIFIER),
    ("ISINOct2015Identifier", patterns::ISIN_OCT2015_IDENTIFIER),
    ("ISO2ALanguageCode", patterns::ISO2A_LANGUAGE_CODE),
    ("LEIIdentifier", patterns::LEI_IDENTIFIER),
    ("Max15NumericText", patterns::MAX15_NUMERIC_TEXT),
    ("Max5NumericText", patterns::MAX5_NUMERIC_TEXT),
    ("PhoneNumber", patterns::PHONE_NUMBER),
    ("UUIDv4Identifier", patterns::UUID_V4_IDENTIFIER),
];

/// Lengths of the `MaxNText` free-text types.
pub const MAX_TEXT_LENGTHS: [u32; 10] = [4, 16, 34, 35, 70, 105, 128, 140, 350, 500];

// =============================================================================
// EXTERNAL CODE SETS
// =============================================================================

/// External code types referenced by CAMT.053.001.09.
pub const EXTERNAL_CODE_TYPES: [&str; 23] = [
    "ExternalAccountIdentification1Code",
    "ExternalBalanceType1Code",
    "ExternalBankTransactionDomain1Code",
    "ExternalBankTransactionFamily1Code",
    "ExternalBankTransactionSubFamily1Code",
    "ExternalCashAccountType1Code",
    "ExternalCategoryPurpose1Code",
    "ExternalChargeType1Code",
    "ExternalClearingSystemIdentification1Code",
    "ExternalCreditorReferenceType1Code",
    "ExternalDiscountAmountType1Code",
    "ExternalDocumentLineType1Code",
    "ExternalEntryStatus1Code",
    "ExternalFinancialInstrumentIdentificationType1Code",
    "ExternalGarnishmentType1Code",
    "ExternalOrganisationIdentification1Code",
    "ExternalPersonIdentification1Code",
    "ExternalProxyAccountType1Code",
    "ExternalPurpose1Code",
    "ExternalReportingSource1Code",
    "ExternalReturnReason1Code",
    "ExternalTaxAmountType1Code",
    "ExternalTechnicalInputChannel1Code",
];

// =============================================================================
// TEMPORALS AND DECIMALS
// =============================================================================

const TEMPORALS: [(&str, Directive); 6] = [
    ("ISODate", Directive::Date),
    ("ISODateTime", Directive::DateTimeUtc),
    ("ISONormalisedDateTime", Directive::DateTimeUtc),
    ("ISOTime", Directive::TimeOffset),
    ("ISOYear", Directive::Year),
    ("ISOYearMonth", Directive::YearMonth),
];

// =============================================================================
// ASSEMBLY
// =============================================================================

/// Build the CAMT.053 registry from loaded settings.
///
/// # Errors
///
/// Fails if the code-set document cannot be read or parsed, or an entry it
/// defines for a catalog type is unusable.
pub fn from_config(config: &NormalizationConfig) -> Result<FieldTypeRegistry> {
    let provider = CodeSetProvider::new(config.code_set_source());
    camt053(config.datetime, &provider)
}

/// Build the CAMT.053 registry with an explicit provider.
pub fn camt053(temporal: TemporalConfig, provider: &CodeSetProvider) -> Result<FieldTypeRegistry> {
    let mut builder = FieldTypeRegistry::builder().temporal_config(temporal);

    for name in MINOR_UNIT_AMOUNTS {
        builder = builder.amount(AmountRule::minor_unit(name));
    }
    builder = builder.amount(AmountRule::fixed(THIRTEEN_DECIMAL_AMOUNT, 13));
    for name in CURRENCY_CODES {
        builder = builder.currency(name);
    }

    for (name, codes) in ENUMERATIONS {
        builder = builder.code(CodeRule::enumeration(*name, codes.iter().copied()));
    }
    for (name, pattern) in PATTERNS {
        builder = builder.pattern(name, pattern)?;
    }
    for length in MAX_TEXT_LENGTHS {
        builder = builder.pattern(&format!("Max{length}Text"), &patterns::max_text(length))?;
    }
    builder = external_types(builder, provider)?;

    for (name, directive) in TEMPORALS {
        builder = builder.temporal(TemporalRule::new(name, directive));
    }
    builder = builder
        .decimal(DecimalRule::new("DecimalNumber", 17, 18))
        .decimal(DecimalRule::new("Number", 0, 18))
        .decimal(DecimalRule::percentage_rate("PercentageRate"))
        .decimal(DecimalRule::base_one_rate("BaseOneRate"));

    let registry = builder.build()?;
    tracing::info!(
        field_types = registry.len(),
        code_sets = %provider.source_name(),
        "registered CAMT.053 field types"
    );
    Ok(registry)
}

fn external_types(
    mut builder: RegistryBuilder,
    provider: &CodeSetProvider,
) -> Result<RegistryBuilder> {
    for name in EXTERNAL_CODE_TYPES {
        match provider.lookup(name) {
            Ok(_) => builder = builder.external(provider, name)?,
            Err(StandardsError::UnknownFieldType { file, .. }) => {
                tracing::warn!(name, file = %file, "external code type not in document, skipped");
            }
            Err(err) => {
                tracing::error!(name, error = %err, "cannot set up external code type");
                return Err(err.into());
            }
        }
    }
    Ok(builder)
}
