//! Declarative label-to-pattern table.

use regex::{Captures, Regex};
use rust_decimal::Decimal;

use crate::models::invoice::Field;

use super::amounts::parse_cad_amount;
use super::line_items::LineItemRule;
use super::patterns::*;
use super::{ExtractionMatch, Rule};

/// How a captured span is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Trimmed text; empty spans count as not found.
    Text,
    /// Like `Text`, but a value starting with a neighbouring label counts
    /// as not found.
    Name,
    /// Three digit groups joined as `XXX-XXX-XXXX`.
    Phone,
    /// CAD$ amount, see [`parse_cad_amount`].
    Amount,
}

/// A converted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Amount(Decimal),
}

impl FieldValue {
    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Amount(_) => None,
        }
    }

    pub fn into_amount(self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(d) => Some(d),
            FieldValue::Text(_) => None,
        }
    }
}

impl Converter {
    /// Convert the value span of a match. Patterns without a capture group
    /// use the whole match.
    pub fn convert(&self, caps: &Captures<'_>) -> Option<FieldValue> {
        let value = caps.get(1).or_else(|| caps.get(0))?.as_str();

        match self {
            Converter::Text => {
                let value = value.trim();
                (!value.is_empty()).then(|| FieldValue::Text(value.to_string()))
            }
            Converter::Name => {
                let value = value.trim();
                let first_word = value.split_whitespace().next()?;
                let is_label = CLIENT_STOP_LABELS
                    .iter()
                    .any(|label| label.eq_ignore_ascii_case(first_word));
                (!is_label).then(|| FieldValue::Text(value.to_string()))
            }
            Converter::Phone => {
                let groups = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
                Some(FieldValue::Text(format!(
                    "{}-{}-{}",
                    groups.0.as_str(),
                    groups.1.as_str(),
                    groups.2.as_str()
                )))
            }
            Converter::Amount => parse_cad_amount(value).map(FieldValue::Amount),
        }
    }
}

/// One `(field, pattern, converter)` row of the table.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub field: Field,
    pub pattern: Regex,
    pub converter: Converter,
}

impl FieldPattern {
    pub fn new(field: Field, pattern: &Regex, converter: Converter) -> Self {
        Self {
            field,
            pattern: pattern.clone(),
            converter,
        }
    }
}

impl Rule for FieldPattern {
    type Output = FieldValue;

    /// Only the first occurrence of the label is considered. If its value
    /// does not convert, the field is not found; later occurrences are not
    /// tried.
    fn find(&self, text: &str) -> Option<ExtractionMatch<FieldValue>> {
        let caps = self.pattern.captures(text)?;
        let value = self.converter.convert(&caps)?;
        Some(ExtractionMatch::new(value, caps.get(0)?))
    }

    fn find_all(&self, text: &str) -> Vec<ExtractionMatch<FieldValue>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let value = self.converter.convert(&caps)?;
                Some(ExtractionMatch::new(value, caps.get(0)?))
            })
            .collect()
    }
}

/// Fixed configuration for the field extractor: one row per scalar field
/// plus the line-item segmentation rule.
#[derive(Debug, Clone)]
pub struct PatternTable {
    fields: Vec<FieldPattern>,
    line_items: LineItemRule,
}

impl PatternTable {
    /// Build a table from explicit rows.
    pub fn new(fields: Vec<FieldPattern>, line_items: LineItemRule) -> Self {
        Self { fields, line_items }
    }

    /// The table for the single-page CAD$ invoice layout.
    pub fn standard() -> Self {
        Self::new(
            vec![
                FieldPattern::new(Field::Client, &CLIENT, Converter::Name),
                FieldPattern::new(Field::Email, &EMAIL, Converter::Text),
                FieldPattern::new(Field::Phone, &PHONE, Converter::Phone),
                FieldPattern::new(Field::PropertyAddress, &PROPERTY_ADDRESS, Converter::Text),
                FieldPattern::new(Field::InvoiceDate, &INVOICE_DATE, Converter::Text),
                FieldPattern::new(Field::OrderNumber, &ORDER_NUMBER, Converter::Text),
                FieldPattern::new(Field::Total, &TOTAL, Converter::Amount),
                FieldPattern::new(Field::Gst, &GST, Converter::Amount),
                FieldPattern::new(Field::TechnologyFee, &TECHNOLOGY_FEE, Converter::Amount),
                FieldPattern::new(Field::PaidAmount, &PAID_AMOUNT, Converter::Amount),
            ],
            LineItemRule::new(&LINE_ITEM),
        )
    }

    /// Scalar field rows, in lookup order.
    pub fn fields(&self) -> &[FieldPattern] {
        &self.fields
    }

    /// Row for a given field, if the table has one.
    pub fn get(&self, field: Field) -> Option<&FieldPattern> {
        self.fields.iter().find(|p| p.field == field)
    }

    pub fn line_items(&self) -> &LineItemRule {
        &self.line_items
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::standard()
    }
}
