//! Pattern-table invoice extractor.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::models::invoice::{Field, ParsedInvoice};

use super::InvoiceExtractor;
use super::rules::{FieldValue, PatternTable, Rule};

/// Parsed invoice together with which fields were actually matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: ParsedInvoice,
    /// Scalar fields whose pattern matched and converted.
    pub found_fields: Vec<Field>,
    /// Scalar fields left at their "not found" value.
    pub missing_fields: Vec<Field>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Number of scalar fields that were matched.
    pub fn found_count(&self) -> usize {
        self.found_fields.len()
    }

    /// Whether fewer than `min_found_fields` scalar fields were matched.
    pub fn is_low_confidence(&self, min_found_fields: usize) -> bool {
        self.found_count() < min_found_fields
    }
}

/// Extracts a [`ParsedInvoice`] from flattened invoice text.
///
/// Each scalar field is one independent, case-insensitive, first-match
/// lookup from the [`PatternTable`]. Line items come from a separate global
/// scan that may re-match spans already used by scalar fields (a `TOTAL
/// CAD$ ...` run also shows up as a `TOTAL` row).
///
/// The extractor holds only immutable compiled patterns and can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    table: PatternTable,
}

impl FieldExtractor {
    /// Create an extractor using the standard CAD$ invoice table.
    pub fn new() -> Self {
        Self::with_table(PatternTable::standard())
    }

    /// Create an extractor with a custom pattern table.
    pub fn with_table(table: PatternTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Extract invoice data and report which fields were found.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let (invoice, matched) = self.run(text);

        let (found_fields, missing_fields): (Vec<Field>, Vec<Field>) = self
            .table
            .fields()
            .iter()
            .map(|row| row.field)
            .partition(|field| matched.contains_key(field));

        let mut warnings: Vec<String> = missing_fields
            .iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();
        if invoice.line_items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        debug!(
            "Extracted {}/{} fields and {} line items",
            found_fields.len(),
            found_fields.len() + missing_fields.len(),
            invoice.line_items.len()
        );

        ExtractionResult {
            invoice,
            found_fields,
            missing_fields,
            warnings,
        }
    }

    fn run(&self, text: &str) -> (ParsedInvoice, BTreeMap<Field, FieldValue>) {
        debug!("Extracting invoice fields from {} characters of text", text.len());

        let mut matched = BTreeMap::new();
        for row in self.table.fields() {
            match row.find(text) {
                Some(m) => {
                    trace!("{} matched {:?} at {:?}", row.field, m.source, m.position);
                    matched.insert(row.field, m.value);
                }
                None => trace!("{} not found", row.field),
            }
        }

        let text_of = |field: Field| matched.get(&field).cloned().and_then(FieldValue::into_text);
        let amount_of =
            |field: Field| matched.get(&field).cloned().and_then(FieldValue::into_amount);

        let total = amount_of(Field::Total);
        let technology_fee = amount_of(Field::TechnologyFee);

        // Only derive revenue from a fee that was actually printed.
        let revenue_total = match (total, technology_fee) {
            (Some(total), Some(fee)) => Some(total - fee),
            _ => None,
        };

        let line_items = self
            .table
            .line_items()
            .find_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();

        let invoice = ParsedInvoice {
            client: text_of(Field::Client),
            email: text_of(Field::Email),
            phone: text_of(Field::Phone),
            property_address: text_of(Field::PropertyAddress),
            invoice_date: text_of(Field::InvoiceDate),
            order_number: text_of(Field::OrderNumber),
            total,
            gst: amount_of(Field::Gst),
            technology_fee: technology_fee.unwrap_or_default(),
            paid_amount: amount_of(Field::PaidAmount),
            revenue_total,
            line_items,
        };

        (invoice, matched)
    }
}

impl InvoiceExtractor for FieldExtractor {
    fn extract(&self, text: &str) -> ParsedInvoice {
        self.run(text).0
    }
}
