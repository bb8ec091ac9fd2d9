//! Line-item segmentation over flowed table text.
//!
//! The invoice table is rendered as repeating `<description> CAD$ <amount>`
//! runs once flattened. Every run is a candidate row; rows that are summary
//! lines (Subtotal, TOTAL, Paid) also match and are kept as-is.

use regex::Regex;
use tracing::trace;

use crate::models::invoice::LineItem;

use super::amounts::parse_cad_amount;
use super::{ExtractionMatch, Rule};

const TECHNOLOGY_FEE_PREFIX: &str = "technology fee";

/// Whether a row description names the technology fee.
pub fn is_technology_fee(description: &str) -> bool {
    description
        .trim()
        .to_lowercase()
        .starts_with(TECHNOLOGY_FEE_PREFIX)
}

/// Global `<description> CAD$ <amount>` scan.
#[derive(Debug, Clone)]
pub struct LineItemRule {
    pattern: Regex,
}

impl LineItemRule {
    /// `pattern` must capture the description in group 1 and the amount in
    /// group 2.
    pub fn new(pattern: &Regex) -> Self {
        Self {
            pattern: pattern.clone(),
        }
    }
}

impl Rule for LineItemRule {
    type Output = LineItem;

    fn find(&self, text: &str) -> Option<ExtractionMatch<LineItem>> {
        self.find_all(text).into_iter().next()
    }

    fn find_all(&self, text: &str) -> Vec<ExtractionMatch<LineItem>> {
        let mut items = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let (Some(full), Some(description), Some(amount)) =
                (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let description = description.as_str().trim();
            if is_technology_fee(description) {
                trace!("Skipping technology fee row: {}", full.as_str());
                continue;
            }

            let Some(amount) = parse_cad_amount(amount.as_str()) else {
                trace!("Skipping row with unparsable amount: {}", full.as_str());
                continue;
            };

            items.push(ExtractionMatch::new(LineItem::new(description, amount), full));
        }

        items
    }
}
