//! Document text source: turns a document handle into flattened text.

mod extractor;

pub use extractor::{extract_text, normalize_whitespace};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DocumentFetchError, SourceError, TextExtractionError};
use crate::models::config::{DocumentConfig, FetchConfig};

/// Result type for text recovery.
pub type Result<T> = std::result::Result<T, TextExtractionError>;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentHandle {
    /// Local file.
    Path(PathBuf),
    /// Remote `http(s)` URL.
    Url(String),
}

impl DocumentHandle {
    /// Interpret a command-line style input as a path or URL.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentHandle::Url(trimmed.to_string())
        } else {
            DocumentHandle::Path(PathBuf::from(trimmed))
        }
    }

    /// Last path segment, used as a format hint and for output naming.
    pub fn file_name(&self) -> Option<String> {
        match self {
            DocumentHandle::Path(path) => path.file_name().map(|n| n.to_string_lossy().into_owned()),
            DocumentHandle::Url(url) => {
                let url = url.split(['?', '#']).next().unwrap_or(url);
                let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
                rest.split_once('/')
                    .and_then(|(_, path)| path.rsplit('/').next())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            }
        }
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentHandle::Path(path) => write!(f, "{}", path.display()),
            DocumentHandle::Url(url) => f.write_str(url),
        }
    }
}

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Detect the kind from content, falling back to the name and content
    /// type hints.
    pub fn detect(data: &[u8], name: Option<&str>, content_type: Option<&str>) -> Result<Self> {
        if data.starts_with(b"%PDF") {
            return Ok(DocumentKind::Pdf);
        }

        let extension = name
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let content_type = content_type.map(|c| c.to_ascii_lowercase());

        match (extension.as_deref(), content_type.as_deref()) {
            (Some("pdf"), _) => Ok(DocumentKind::Pdf),
            (_, Some(ct)) if ct.starts_with("application/pdf") => Ok(DocumentKind::Pdf),
            (Some("txt" | "text"), _) => Ok(DocumentKind::Text),
            (_, Some(ct)) if ct.starts_with("text/") => Ok(DocumentKind::Text),
            _ if std::str::from_utf8(data).is_ok() => Ok(DocumentKind::Text),
            (ext, ct) => Err(TextExtractionError::UnsupportedFormat(
                ext.or(ct).unwrap_or("binary").to_string(),
            )),
        }
    }
}

/// Raw document bytes as retrieved, before text recovery.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub data: Vec<u8>,
    /// File name or last URL segment.
    pub name: Option<String>,
    /// `Content-Type` reported by the server, if any.
    pub content_type: Option<String>,
}

impl FetchedDocument {
    pub fn kind(&self) -> Result<DocumentKind> {
        DocumentKind::detect(&self.data, self.name.as_deref(), self.content_type.as_deref())
    }

    /// Recover flattened text from the document.
    pub fn into_text(self, config: &DocumentConfig) -> Result<String> {
        let kind = self.kind()?;
        extract_text(&self.data, kind, config)
    }
}

/// Trait for collaborators that supply invoice text for a document handle.
pub trait DocumentSource {
    /// Retrieve the document and recover its text.
    fn fetch_text(&self, handle: &DocumentHandle) -> std::result::Result<String, SourceError>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    fetch: FetchConfig,
    document: DocumentConfig,
}

impl FileSource {
    pub fn new(fetch: FetchConfig, document: DocumentConfig) -> Self {
        Self { fetch, document }
    }

    /// Read a local file, enforcing the configured size limit.
    pub fn fetch(&self, path: &Path) -> std::result::Result<FetchedDocument, DocumentFetchError> {
        if !path.exists() {
            return Err(DocumentFetchError::NotFound(path.to_path_buf()));
        }

        let size = fs::metadata(path)?.len();
        if size > self.fetch.max_bytes {
            return Err(DocumentFetchError::TooLarge {
                size,
                limit: self.fetch.max_bytes,
            });
        }

        info!("Reading document {}", path.display());
        let data = fs::read(path)?;
        debug!("Read {} bytes", data.len());

        Ok(FetchedDocument {
            data,
            name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
            content_type: None,
        })
    }
}

impl DocumentSource for FileSource {
    fn fetch_text(&self, handle: &DocumentHandle) -> std::result::Result<String, SourceError> {
        let path = match handle {
            DocumentHandle::Path(path) => path,
            DocumentHandle::Url(url) => {
                return Err(DocumentFetchError::UnsupportedHandle(url.clone()).into());
            }
        };

        let document = self.fetch(path)?;
        Ok(document.into_text(&self.document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_handle_parse() {
        assert_eq!(
            DocumentHandle::parse("https://example.com/inv.pdf"),
            DocumentHandle::Url("https://example.com/inv.pdf".to_string())
        );
        assert_eq!(
            DocumentHandle::parse("HTTP://example.com/a"),
            DocumentHandle::Url("HTTP://example.com/a".to_string())
        );
        assert_eq!(
            DocumentHandle::parse("invoices/inv.pdf"),
            DocumentHandle::Path(PathBuf::from("invoices/inv.pdf"))
        );
    }

    #[test]
    fn test_handle_file_name() {
        let handle = DocumentHandle::parse("https://example.com/files/inv-42.pdf?dl=1");
        assert_eq!(handle.file_name().as_deref(), Some("inv-42.pdf"));

        let handle = DocumentHandle::parse("https://example.com");
        assert_eq!(handle.file_name(), None);

        let handle = DocumentHandle::parse("/tmp/a/b.txt");
        assert_eq!(handle.file_name().as_deref(), Some("b.txt"));
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(DocumentKind::detect(b"%PDF-1.7", None, None).unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::detect(b"junk", Some("inv.PDF"), None).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(b"\xff\xfe", None, Some("application/pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(b"TOTAL CAD$ 1.00", Some("inv"), None).unwrap(),
            DocumentKind::Text
        );
        assert!(matches!(
            DocumentKind::detect(b"\xff\xfe\x00", Some("scan.png"), None),
            Err(TextExtractionError::UnsupportedFormat(ext)) if ext == "png"
        ));
    }

    #[test]
    fn test_file_source_reads_text() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Bill To: Jane Doe\nTOTAL CAD$ 1,234.56").unwrap();

        let source = FileSource::default();
        let text = source
            .fetch_text(&DocumentHandle::Path(file.path().to_path_buf()))
            .unwrap();
        assert_eq!(text, "Bill To: Jane Doe TOTAL CAD$ 1,234.56");
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::default();
        let err = source
            .fetch_text(&DocumentHandle::Path(PathBuf::from("/definitely/not/here.pdf")))
            .unwrap_err();
        assert!(matches!(err, SourceError::Fetch(DocumentFetchError::NotFound(_))));
    }

    #[test]
    fn test_file_source_rejects_urls() {
        let source = FileSource::default();
        let err = source
            .fetch_text(&DocumentHandle::parse("https://example.com/inv.pdf"))
            .unwrap_err();
        assert!(matches!(err, SourceError::Fetch(DocumentFetchError::UnsupportedHandle(_))));
    }

    #[test]
    fn test_file_source_size_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'a'; 64]).unwrap();

        let fetch = FetchConfig {
            max_bytes: 16,
            ..FetchConfig::default()
        };
        let source = FileSource::new(fetch, DocumentConfig::default());
        let err = source.fetch(file.path()).unwrap_err();
        assert!(matches!(err, DocumentFetchError::TooLarge { size: 64, limit: 16 }));
    }

    #[test]
    fn test_file_source_text_extraction_error() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"tiny").unwrap();

        let err = FileSource::default()
            .fetch_text(&DocumentHandle::Path(file.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, SourceError::TextExtraction(TextExtractionError::Empty(4))));
    }
}
