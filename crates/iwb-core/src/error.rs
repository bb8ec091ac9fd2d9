//! Error types for the iwb-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading and saving pipeline configuration.
#[derive(Error, Debug)]
pub enum IwbError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while retrieving a document.
#[derive(Error, Debug)]
pub enum DocumentFetchError {
    /// Local file does not exist.
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the document failed.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// Remote server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// Payload exceeds the configured limit.
    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    /// The source cannot serve this kind of handle.
    #[error("unsupported document handle: {0}")]
    UnsupportedHandle(String),
}

/// Errors raised while turning document bytes into text.
#[derive(Error, Debug)]
pub enum TextExtractionError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Text document is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Document format is not recognised.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Nothing (or too little) text was recovered.
    #[error("document contains no extractable text ({0} characters)")]
    Empty(usize),
}

/// Errors related to invoice field extraction.
///
/// Missing or unparsable fields are never errors; they surface as absent
/// values on the parsed record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// The caller broke the input contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failure of a [`DocumentSource`](crate::document::DocumentSource).
///
/// Kept separate from [`ExtractionError`] so callers can tell "could not read
/// the document" apart from "read it, but it does not look like an invoice".
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] DocumentFetchError),

    #[error(transparent)]
    TextExtraction(#[from] TextExtractionError),
}

/// Result type for the iwb library.
pub type Result<T> = std::result::Result<T, IwbError>;
