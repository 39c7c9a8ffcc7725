//! On-chain hash lookup.
//!
//! After the wallet returns the signed external message, an indexing API
//! can report the hash of the resulting message so the receipt can link to
//! an explorer. The lookup is optional and never fails a payment.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::PayConfig;
use crate::error::{PayError, PayResult};

/// Looks up the hash of a submitted message BoC.
pub trait HashLookup: Send + Sync {
    /// Hash of the message in `boc`, or `None` if the service does not know it.
    fn lookup_hash(&self, boc: &str) -> impl Future<Output = PayResult<Option<String>>> + Send;
}

/// Lookup that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl HashLookup for NoLookup {
    async fn lookup_hash(&self, _boc: &str) -> PayResult<Option<String>> {
        Ok(None)
    }
}

#[derive(Debug, Serialize)]
struct SendBocRequest<'a> {
    boc: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendBocResponse {
    #[serde(default)]
    result: Option<SendBocResult>,
}

#[derive(Debug, Deserialize)]
struct SendBocResult {
    #[serde(default)]
    hash: Option<String>,
}

/// TON Center v2 client using `sendBocReturnHash`.
#[derive(Debug, Clone)]
pub struct TonCenterClient {
    client: reqwest::Client,
    api: String,
}

impl TonCenterClient {
    /// Create a client for `api` (e.g. `https://toncenter.com/api/v2`).
    pub fn new(api: impl Into<String>, timeout: Duration) -> PayResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api: api.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the payment configuration.
    pub fn from_config(config: &PayConfig) -> PayResult<Self> {
        Self::new(config.toncenter_api.clone(), config.lookup_timeout())
    }

    /// Endpoint URL used for lookups.
    pub fn endpoint(&self) -> String {
        format!("{}/sendBocReturnHash", self.api)
    }
}

impl HashLookup for TonCenterClient {
    async fn lookup_hash(&self, boc: &str) -> PayResult<Option<String>> {
        let url = self.endpoint();
        trace!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&SendBocRequest { boc })
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("Hash lookup returned HTTP {}", response.status());
            return Ok(None);
        }

        let body = response.text().await?;
        parse_hash_response(&body)
    }
}

/// Extract `result.hash` from a `sendBocReturnHash` response body.
fn parse_hash_response(body: &str) -> PayResult<Option<String>> {
    let response: SendBocResponse =
        serde_json::from_str(body).map_err(|e| PayError::Lookup(e.to_string()))?;
    Ok(response
        .result
        .and_then(|r| r.hash)
        .filter(|hash| !hash.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP request with `status` and a JSON `body`, returning the
    /// API base URL and the raw request text.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\n",
                    "content-type: application/json\r\n",
                    "content-length: {}\r\n",
                    "connection: close\r\n\r\n{}"
                ),
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });

        (format!("http://{}/api/v2", addr), handle)
    }

    /// Read headers and a `content-length` body.
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .map(|(_, value)| value.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn client(api: &str) -> TonCenterClient {
        TonCenterClient::new(api, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_hash_response() {
        let body =
            r#"{"ok":true,"result":{"@type":"ext.message.hash","hash":"nZ1kX4xFqK3vPq=="}}"#;
        assert_eq!(
            parse_hash_response(body).unwrap().as_deref(),
            Some("nZ1kX4xFqK3vPq==")
        );
    }

    #[test]
    fn test_parse_hash_response_missing_fields() {
        assert_eq!(parse_hash_response(r#"{"ok":false,"error":"bad boc"}"#).unwrap(), None);
        assert_eq!(parse_hash_response(r#"{"ok":true,"result":{}}"#).unwrap(), None);
        assert_eq!(parse_hash_response(r#"{"ok":true,"result":{"hash":""}}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_hash_response_invalid_json() {
        assert!(matches!(parse_hash_response("<html>"), Err(PayError::Lookup(_))));
    }

    #[test]
    fn test_endpoint() {
        let client =
            TonCenterClient::new("https://toncenter.com/api/v2/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "https://toncenter.com/api/v2/sendBocReturnHash");

        let client = TonCenterClient::from_config(&PayConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "https://toncenter.com/api/v2/sendBocReturnHash");
    }

    #[tokio::test]
    async fn test_toncenter_returns_hash() {
        let (api, server) = serve_once(
            "200 OK",
            r#"{"ok":true,"result":{"@type":"ext.message.hash","hash":"abc123"}}"#,
        )
        .await;

        let hash = client(&api).lookup_hash("te6cckEBAQEAAgAAAEysuc0=").await.unwrap();
        assert_eq!(hash.as_deref(), Some("abc123"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v2/sendBocReturnHash HTTP/1.1"));
        assert!(request.ends_with(r#"{"boc":"te6cckEBAQEAAgAAAEysuc0="}"#));
    }

    #[tokio::test]
    async fn test_toncenter_error_status_is_not_found() {
        let (api, server) = serve_once(
            "500 Internal Server Error",
            r#"{"ok":false,"error":"internal"}"#,
        )
        .await;

        assert_eq!(client(&api).lookup_hash("te6cc").await.unwrap(), None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_toncenter_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(&format!("http://{}/api/v2", addr)).lookup_hash("te6cc").await;
        assert!(matches!(result, Err(PayError::Http(_))));
    }

    #[tokio::test]
    async fn test_no_lookup() {
        assert_eq!(NoLookup.lookup_hash("te6cc").await.unwrap(), None);
    }
}
