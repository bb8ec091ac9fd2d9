//! Remote document retrieval over HTTP(S).

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use iwb_core::models::config::FetchConfig;
use iwb_core::{DocumentFetchError, DocumentHandle, FetchedDocument};

/// Downloads documents with the configured timeout and size limit.
pub struct HttpSource {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self, DocumentFetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DocumentFetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedDocument, DocumentFetchError> {
        info!("Downloading {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DocumentFetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentFetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(size) = response.content_length() {
            self.check_size(size)?;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Chunked responses carry no length, so the limit is applied as we go
        let mut stream = response.bytes_stream();
        let mut data = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DocumentFetchError::Request(e.to_string()))?;
            self.check_size((data.len() + chunk.len()) as u64)?;
            data.extend_from_slice(&chunk);
        }

        debug!("Downloaded {} bytes ({:?})", data.len(), content_type);

        Ok(FetchedDocument {
            data,
            name: DocumentHandle::Url(url.to_string()).file_name(),
            content_type,
        })
    }

    fn check_size(&self, size: u64) -> Result<(), DocumentFetchError> {
        if size > self.max_bytes {
            return Err(DocumentFetchError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Serve a single connection on a local port and return its base URL.
    fn serve_once<F>(respond: F) -> String
    where
        F: FnOnce(&mut TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                respond(&mut stream);
            }
        });

        format!("http://{}", addr)
    }

    fn source(max_bytes: u64) -> HttpSource {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        HttpSource { client, max_bytes }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base = serve_once(|stream| {
            let body = "TOTAL CAD$ 10.00";
            let _ = write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
        });

        let doc = source(1024).fetch(&format!("{}/inv/may.txt?x=1", base)).await.unwrap();
        assert_eq!(doc.data, b"TOTAL CAD$ 10.00");
        assert_eq!(doc.name.as_deref(), Some("may.txt"));
        assert_eq!(doc.content_type.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base = serve_once(|stream| {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        });

        let url = format!("{}/missing.pdf", base);
        let err = source(1024).fetch(&url).await.unwrap_err();
        assert!(matches!(err, DocumentFetchError::Status { status: 404, url: ref u } if *u == url));
    }

    #[tokio::test]
    async fn test_declared_length_over_limit() {
        let base = serve_once(|stream| {
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\nConnection: close\r\n\r\n",
            );
            let _ = stream.write_all(&[b'a'; 64]);
        });

        let err = source(16).fetch(&base).await.unwrap_err();
        assert!(matches!(err, DocumentFetchError::TooLarge { size: 64, limit: 16 }));
    }

    #[tokio::test]
    async fn test_chunked_body_over_limit() {
        let base = serve_once(|stream| {
            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n");
            let chunk = [b'a'; 4096];
            // Never terminates on its own; stops once the client hangs up
            loop {
                let ok = stream.write_all(b"1000\r\n").is_ok()
                    && stream.write_all(&chunk).is_ok()
                    && stream.write_all(b"\r\n").is_ok();
                if !ok {
                    break;
                }
            }
        });

        let err = source(16).fetch(&base).await.unwrap_err();
        assert!(matches!(err, DocumentFetchError::TooLarge { limit: 16, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let err = source(1024).fetch(&format!("http://{}/inv.pdf", addr)).await.unwrap_err();
        assert!(matches!(err, DocumentFetchError::Request(_)));
    }
}
