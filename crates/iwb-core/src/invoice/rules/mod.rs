//! Rule-based field extractors for CAD$ inspection invoices.

pub mod amounts;
pub mod line_items;
pub mod patterns;
pub mod table;

pub use amounts::{format_cad_amount, parse_cad_amount};
pub use line_items::{LineItemRule, is_technology_fee};
pub use table::{Converter, FieldPattern, FieldValue, PatternTable};

/// Trait for single-pattern extraction rules.
pub trait Rule {
    /// The type of value this rule produces.
    type Output;

    /// Return the first match in text.
    fn find(&self, text: &str) -> Option<ExtractionMatch<Self::Output>>;

    /// Return every match, in order of appearance.
    fn find_all(&self, text: &str) -> Vec<ExtractionMatch<Self::Output>>;
}

/// A converted value together with the span it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the whole match in the source text.
    pub position: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, m: regex::Match<'_>) -> Self {
        Self {
            value,
            position: (m.start(), m.end()),
            source: m.as_str().to_string(),
        }
    }
}
