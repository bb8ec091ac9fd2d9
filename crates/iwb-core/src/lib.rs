//! Core library for inspection invoice processing.
//!
//! This crate provides:
//! - Document text recovery (PDF via lopdf/pdf-extract, plain text)
//! - Pattern-table field extraction for single-page CAD$ invoices
//! - The `ParsedInvoice` record and pipeline configuration

pub mod document;
pub mod error;
pub mod invoice;
pub mod models;

pub use document::{DocumentHandle, DocumentKind, DocumentSource, FetchedDocument, FileSource};
pub use error::{
    DocumentFetchError, ExtractionError, IwbError, Result, SourceError, TextExtractionError,
};
pub use invoice::{ExtractionResult, FieldExtractor, InvoiceExtractor};
pub use models::config::IwbConfig;
pub use models::invoice::{Field, LineItem, ParsedInvoice};
