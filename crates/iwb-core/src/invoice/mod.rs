//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FieldExtractor};

use crate::error::ExtractionError;
use crate::models::invoice::ParsedInvoice;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for invoice field extractors.
///
/// Implementations turn the flattened text of one invoice page into a
/// [`ParsedInvoice`]. Missing or malformed fields degrade to absent values;
/// the only failure is a broken input contract.
pub trait InvoiceExtractor {
    /// Extract invoice data from plain text.
    fn extract(&self, text: &str) -> ParsedInvoice;

    /// Extract invoice data from text that may be absent.
    fn try_extract(&self, text: Option<&str>) -> Result<ParsedInvoice> {
        text.map(|t| self.extract(t)).ok_or_else(|| {
            ExtractionError::InvalidArgument("invoice text is required".to_string())
        })
    }
}
