//! ISO 20022 pattern facets used by regex-constrained field types.
//!
//! Patterns are stored unanchored, exactly as the message schema publishes
//! them; [`CodePattern`](crate::CodePattern) anchors them for full matching.

/// `CountryCode` (ISO 3166 alpha-2).
pub const COUNTRY_CODE: &str = "[A-Z]{2,2}";

/// `ISO2ALanguageCode` (ISO 639-1, lowercase).
pub const ISO2A_LANGUAGE_CODE: &str = "[a-z]{2,2}";

/// `PhoneNumber`: `+` country prefix, dash, then digits and punctuation.
pub const PHONE_NUMBER: &str = r"\+[0-9]{1,3}-[0-9()+\-]{1,30}";

/// `UUIDv4Identifier` (RFC 4122 version 4, lowercase hex).
pub const UUID_V4_IDENTIFIER: &str =
    "[a-f0-9]{8}-[a-f0-9]{4}-4[a-f0-9]{3}-[89ab][a-f0-9]{3}-[a-f0-9]{12}";

/// `IBAN2007Identifier`.
pub const IBAN_2007_IDENTIFIER: &str = "[A-Z]{2,2}[0-9]{2,2}[a-zA-Z0-9]{1,30}";

/// `BICFIDec2014Identifier` and `AnyBICDec2014Identifier`.
pub const BIC_DEC2014_IDENTIFIER: &str = "[A-Z0-9]{4,4}[A-Z]{2,2}[A-Z0-9]{2,2}([A-Z0-9]{3,3}){0,1}";

/// `ISINOct2015Identifier`.
pub const ISIN_OCT2015_IDENTIFIER: &str = "[A-Z]{2,2}[A-Z0-9]{9,9}[0-9]{1,1}";

/// `LEIIdentifier`.
pub const LEI_IDENTIFIER: &str = "[A-Z0-9]{18,18}[0-9]{2,2}";

/// `Exact4AlphaNumericText`.
pub const EXACT4_ALPHANUMERIC_TEXT: &str = "[a-zA-Z0-9]{4}";

/// `Max5NumericText`.
pub const MAX5_NUMERIC_TEXT: &str = "[0-9]{1,5}";

/// `Max15NumericText`.
pub const MAX15_NUMERIC_TEXT: &str = "[0-9]{1,15}";

/// `MaxNText`: between 1 and `max` characters of any kind.
pub fn max_text(max: u32) -> String {
    format!("(?s:.){{1,{max}}}")
}

/// Uppercase letters only, `min..=max` long. Used for external code sets
/// that publish a length range instead of an enumeration.
pub fn uppercase_letters(min: u32, max: u32) -> String {
    format!("[A-Z]{{{min},{max}}}")
}
