//! Transport collaborator: moves an encoded request to the gateway and
//! brings back the raw response text.

use std::future::Future;
use std::time::Duration;

/// Form field the gateway reads the encoded request from.
pub const PARAMETER_LIST_FIELD: &str = "parmList";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures below the protocol: the gateway could not be reached or did not
/// answer with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("gateway returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("transport is offline")]
    Offline,
}

/// Sends an encoded request body to a URL and returns the response text.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        url: &str,
        body: &str,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// HTTPS transport backed by `reqwest`.
///
/// Posts the encoded request as the `parmList` form field.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom timeouts).
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let resp = self
            .http
            .post(url)
            .form(&[(PARAMETER_LIST_FIELD, body)])
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        let text = resp.text().await.map_err(classify)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "gateway returned non-success status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(e.to_string())
    }
}

/// Transport that never reaches the network. Backs stubbed gateways.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    async fn post(&self, _url: &str, _body: &str) -> Result<String, TransportError> {
        Err(TransportError::Offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// One-shot HTTP server: reads a full request, writes `reply`, returns
    /// the request text.
    async fn serve_once(reply: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/default.pay", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (url, handle)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let length = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if body.len() >= length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_posts_parameter_list_form() {
        let (url, server) =
            serve_once("HTTP/1.1 200 OK\r\nContent-Length: 12\r\nConnection: close\r\n\r\nRESPONSE~ok|")
                .await;

        let body = HttpTransport::new().unwrap().post(&url, "UN~x|").await.unwrap();
        assert_eq!(body, "RESPONSE~ok|");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/default.pay "));
        assert!(request.contains("application/x-www-form-urlencoded"));
        assert!(request.ends_with("parmList=UN%7Ex%7C"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_status_error() {
        let (url, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndown",
        )
        .await;

        let err = HttpTransport::new().unwrap().post(&url, "UN~x|").await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 503,
                body: "down".to_string(),
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_silent_gateway_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/default.pay", listener.local_addr().unwrap());
        tokio::spawn(async move {
            // Accept and never answer
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let err = HttpTransport::with_http_client(http)
            .post(&url, "UN~x|")
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Timeout);
    }

    #[tokio::test]
    async fn test_offline_transport_always_fails() {
        let result = OfflineTransport.post("https://paytrace.com/api/default.pay", "UN~x|").await;
        assert_eq!(result, Err(TransportError::Offline));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_request_error() {
        let transport = HttpTransport::new().unwrap();
        // Port 1 on loopback refuses connections.
        let err = transport.post("http://127.0.0.1:1/api/default.pay", "UN~x|").await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "gateway returned HTTP 503");
    }
}
