//! Element writers for validated field values.
//!
//! Values arrive already normalized; their canonical text is written verbatim
//! and never rounded or reformatted here.

use std::io::Write;

use camt_model::{FieldValue, MonetaryAmount};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{OutputError, Result};

/// Currency attribute name used by ISO 20022 XML (`<Amt Ccy="EUR">`).
///
/// This is the default even though older serializers of these models wrote
/// a lowercase `ccy`; pass [`LEGACY_CURRENCY_ATTRIBUTE`] to reproduce them.
pub const CURRENCY_ATTRIBUTE: &str = "Ccy";

/// Lowercase currency attribute used by older serializers.
pub const LEGACY_CURRENCY_ATTRIBUTE: &str = "ccy";

/// Something that renders as a single XML element.
pub trait XmlElement {
    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()>;
}

/// Render one element to a string, without an XML declaration.
pub fn to_xml_string(element: &impl XmlElement) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    element.write_to(&mut writer)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Write a simple text element.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    check_name(name)?;
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        tracing::debug!(name, "rejected XML name");
        Err(OutputError::InvalidName {
            name: name.to_string(),
        })
    }
}

// =============================================================================
// AMOUNTS
// =============================================================================

/// An amount element: currency as attribute, magnitude as content.
#[derive(Debug, Clone, Copy)]
pub struct AmountElement<'a> {
    tag: &'a str,
    amount: &'a MonetaryAmount,
    currency_attribute: &'a str,
}

impl<'a> AmountElement<'a> {
    /// Element with the schema's `Ccy` attribute, not the legacy `ccy`.
    pub fn new(tag: &'a str, amount: &'a MonetaryAmount) -> Self {
        Self {
            tag,
            amount,
            currency_attribute: CURRENCY_ATTRIBUTE,
        }
    }

    /// Use another attribute name for the currency.
    #[must_use]
    pub fn with_currency_attribute(mut self, name: &'a str) -> Self {
        self.currency_attribute = name;
        self
    }
}

impl XmlElement for AmountElement<'_> {
    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        check_name(self.tag)?;
        check_name(self.currency_attribute)?;
        let mut start = BytesStart::new(self.tag);
        start.push_attribute((self.currency_attribute, self.amount.currency().as_str()));
        writer.write_event(Event::Start(start))?;
        writer.write_event(Event::Text(BytesText::new(&self.amount.text())))?;
        writer.write_event(Event::End(BytesEnd::new(self.tag)))?;
        Ok(())
    }
}

// =============================================================================
// ANY FIELD VALUE
// =============================================================================

/// Element for any validated value; amounts get their currency attribute.
#[derive(Debug, Clone, Copy)]
pub struct ValueElement<'a> {
    tag: &'a str,
    value: &'a FieldValue,
    currency_attribute: &'a str,
}

impl<'a> ValueElement<'a> {
    pub fn new(tag: &'a str, value: &'a FieldValue) -> Self {
        Self {
            tag,
            value,
            currency_attribute: CURRENCY_ATTRIBUTE,
        }
    }

    #[must_use]
    pub fn with_currency_attribute(mut self, name: &'a str) -> Self {
        self.currency_attribute = name;
        self
    }
}

impl XmlElement for ValueElement<'_> {
    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self.value {
            FieldValue::Amount(amount) => AmountElement::new(self.tag, amount)
                .with_currency_attribute(self.currency_attribute)
                .write_to(writer),
            other => write_text_element(writer, self.tag, &other.text()),
        }
    }
}
