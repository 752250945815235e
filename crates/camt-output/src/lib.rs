//! XML rendering of validated field values.
//!
//! Amounts become `<Tag Ccy="EUR">123.45</Tag>`; every other value becomes a
//! plain text element holding its canonical text.

pub mod error;
pub mod xml;

pub use error::{OutputError, Result};
pub use xml::{
    AmountElement, CURRENCY_ATTRIBUTE, LEGACY_CURRENCY_ATTRIBUTE, ValueElement, XmlElement,
    to_xml_string, write_text_element,
};
