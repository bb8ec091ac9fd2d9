//! Parsed invoice record produced by the field extractor.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured data recovered from the flattened text of one invoice page.
///
/// Every scalar field is independently optional. Absent fields serialize as
/// `null` so the JSON shape is stable across documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    /// Billed-to name.
    pub client: Option<String>,

    /// Contact email.
    pub email: Option<String>,

    /// Contact phone, normalized to `XXX-XXX-XXXX`.
    pub phone: Option<String>,

    /// Inspected property address.
    pub property_address: Option<String>,

    /// Raw date token as printed on the invoice.
    pub invoice_date: Option<String>,

    /// Order number.
    pub order_number: Option<String>,

    /// Invoice total.
    pub total: Option<Decimal>,

    /// GST amount.
    pub gst: Option<Decimal>,

    /// Technology fee; zero when the document has none.
    #[serde(default)]
    pub technology_fee: Decimal,

    /// Amount already paid.
    pub paid_amount: Option<Decimal>,

    /// `total - technology_fee`, only when both were found.
    pub revenue_total: Option<Decimal>,

    /// Billable line items in order of appearance.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// A single `<description> CAD$ <amount>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// Scalar fields recognised by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Client,
    Email,
    Phone,
    PropertyAddress,
    InvoiceDate,
    OrderNumber,
    Total,
    Gst,
    TechnologyFee,
    PaidAmount,
}

impl Field {
    /// All scalar fields, in record order.
    pub const ALL: [Field; 10] = [
        Field::Client,
        Field::Email,
        Field::Phone,
        Field::PropertyAddress,
        Field::InvoiceDate,
        Field::OrderNumber,
        Field::Total,
        Field::Gst,
        Field::TechnologyFee,
        Field::PaidAmount,
    ];

    /// Key used for this field in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Client => "client",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::PropertyAddress => "property_address",
            Field::InvoiceDate => "invoice_date",
            Field::OrderNumber => "order_number",
            Field::Total => "total",
            Field::Gst => "gst",
            Field::TechnologyFee => "technology_fee",
            Field::PaidAmount => "paid_amount",
        }
    }

    /// Whether the field holds a monetary amount.
    pub fn is_amount(&self) -> bool {
        matches!(
            self,
            Field::Total | Field::Gst | Field::TechnologyFee | Field::PaidAmount
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParsedInvoice {
    /// Sum of all line item amounts.
    pub fn line_items_total(&self) -> Decimal {
        self.line_items.iter().map(|i| i.amount).sum()
    }

    /// Check the record for internal inconsistencies.
    ///
    /// These are advisory; a record with issues is still a valid result.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.client.is_none() {
            issues.push("Missing client".to_string());
        }

        if self.total.is_none() {
            issues.push("Missing total".to_string());
        }

        if self.line_items.is_empty() {
            issues.push("No line items".to_string());
        }

        if let (Some(total), Some(paid)) = (self.total, self.paid_amount) {
            if paid > total {
                issues.push(format!("Paid amount ({}) exceeds total ({})", paid, total));
            }
        }

        if let Some(total) = self.total {
            if self.technology_fee > total {
                issues.push(format!(
                    "Technology fee ({}) exceeds total ({})",
                    self.technology_fee, total
                ));
            }
        }

        issues
    }
}
