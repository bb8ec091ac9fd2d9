//! Regex patterns for the single-page CAD$ inspection invoice layout.
//!
//! All patterns are run against whitespace-flattened text. Amount captures
//! accept `,` thousands separators, which are stripped before parsing.

use lazy_static::lazy_static;
use regex::Regex;

/// Labels that end the `Bill To` name. A name starting with one of these
/// means the name itself was left blank.
pub const CLIENT_STOP_LABELS: &[&str] = &[
    "Property", "Email", "E-mail", "Phone", "Tel", "Date", "Invoice", "Order",
];

lazy_static! {
    // Parties; names may carry accents and straight or curly apostrophes
    pub static ref CLIENT: Regex = Regex::new(&format!(
        r"(?i)\bBill\s+To\b\s*:?\s*(\p{{L}}[\p{{L}}'’ ]*?)\s*(?:\b(?:{})\b|[^\p{{L}}'’ ]|$)",
        CLIENT_STOP_LABELS.join("|")
    )).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // North American 3-3-4, separators optional
    pub static ref PHONE: Regex = Regex::new(
        r"\(?\b(\d{3})\)?[\s.\-]?(\d{3})[\s.\-]?(\d{4})\b"
    ).unwrap();

    pub static ref PROPERTY_ADDRESS: Regex = Regex::new(
        r"(?i)\bProperty(?:\s+Address)?\b\s*:?\s*(.+?)\s*\b(?:Invoice\s+)?Date\b"
    ).unwrap();

    // Header
    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"(?i)\bDate\b\s*:?\s*(\d{1,4}/\d{1,2}/\d{1,4})"
    ).unwrap();

    pub static ref ORDER_NUMBER: Regex = Regex::new(
        r"(?i)\bOrder\b\s*(?:No\.?|Number|#)?\s*:?\s*#?\s*(\d+)"
    ).unwrap();

    // Amounts
    pub static ref TOTAL: Regex = Regex::new(
        r"(?i)\bTOTAL\s+CAD\$\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    pub static ref TECHNOLOGY_FEE: Regex = Regex::new(
        r"(?i)\bTechnology\s+Fee\b.*?CAD\$\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    pub static ref PAID_AMOUNT: Regex = Regex::new(
        r"(?i)\bPaid\b\s*(?:\([^)]*\))?\s*CAD\$\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    pub static ref GST: Regex = Regex::new(
        r"(?i)\bGST\b.*?CAD\$\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    // Flowed table rows: "<description> CAD$ <amount>"
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"(?i)(\p{L}[\p{L} &'’/().,:\-]*?)\s*CAD\$\s*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();
}
