//! [`AnalysisGateway`] implementation over HTTP.

use super::error::HttpGatewayError;
use super::protocol::{AnalyzeResponse, ChatRequest, ChatResponse};
use async_trait::async_trait;
use docchat_application::{AnalysisGateway, ChatQuery, DocumentContent, GatewayError};
use docchat_domain::util::truncate_str;
use docchat_domain::{ChatAnswer, DocumentAnalysis};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("docchat/", env!("CARGO_PKG_VERSION"));

/// Longest response body quoted in a status error.
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for [`HttpAnalysisGateway`]
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL; endpoints are joined onto it, so it should end with `/`.
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Analysis service client
pub struct HttpAnalysisGateway {
    client: Client,
    analyze_url: Url,
    chat_url: Url,
}

impl HttpAnalysisGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, HttpGatewayError> {
        let invalid = |reason: String| HttpGatewayError::InvalidBaseUrl {
            url: config.base_url.to_string(),
            reason,
        };

        if !matches!(config.base_url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme '{}'",
                config.base_url.scheme()
            )));
        }
        let analyze_url = config
            .base_url
            .join("analyze")
            .map_err(|e| invalid(e.to_string()))?;
        let chat_url = config
            .base_url
            .join("chat")
            .map_err(|e| invalid(e.to_string()))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            analyze_url,
            chat_url,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }
}

#[async_trait]
impl AnalysisGateway for HttpAnalysisGateway {
    async fn analyze(&self, document: &DocumentContent) -> Result<DocumentAnalysis, GatewayError> {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&document.media_type)
            .map_err(transport_error)?;
        let form = Form::new().part("file", part);

        debug!("POST {} ({})", self.analyze_url, document.file_name);
        let response = self
            .client
            .post(self.analyze_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let body: AnalyzeResponse = decode(response).await?;
        DocumentAnalysis::try_from(body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn chat(&self, query: &ChatQuery) -> Result<ChatAnswer, GatewayError> {
        let request = ChatRequest {
            doc_id: &query.document_reference,
            question: &query.question,
            top_k: query.top_k,
        };

        debug!("POST {} (doc {})", self.chat_url, query.document_reference);
        let response = self
            .client
            .post(self.chat_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let body: ChatResponse = decode(response).await?;
        Ok(body.into())
    }
}

/// Check the status, then parse the JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), status.canonical_reason(), &body));
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

/// Build the error for a non-success status.
///
/// The message is the canonical reason phrase, or the response body when the
/// status has none.
fn status_error(status: u16, reason: Option<&str>, body: &str) -> GatewayError {
    let message = match reason {
        Some(reason) => reason.to_string(),
        None if !body.trim().is_empty() => truncate_str(body.trim(), MAX_ERROR_BODY).to_string(),
        None => "Unknown".to_string(),
    };
    GatewayError::Status { status, message }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_decode() {
        GatewayError::InvalidResponse(error.to_string())
    } else {
        GatewayError::Connection(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn config(base_url: &str, request_timeout: Duration) -> HttpGatewayConfig {
        HttpGatewayConfig {
            base_url: Url::parse(base_url).unwrap(),
            connect_timeout: Duration::from_secs(2),
            request_timeout,
        }
    }

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = Url::parse(&format!("http://{}/api/", listener.local_addr().unwrap())).unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(request);
        });

        (base, rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_endpoints_join_onto_base_path() {
        let gateway =
            HttpAnalysisGateway::new(config("http://localhost:8000/v1/", Duration::from_secs(5)))
                .unwrap();
        assert_eq!(gateway.analyze_url().as_str(), "http://localhost:8000/v1/analyze");
        assert_eq!(gateway.chat_url().as_str(), "http://localhost:8000/v1/chat");
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let result = HttpAnalysisGateway::new(config("ftp://files.example.com/", Duration::from_secs(5)));
        assert!(matches!(result, Err(HttpGatewayError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_status_error_prefers_reason_phrase() {
        assert_eq!(
            status_error(500, Some("Internal Server Error"), "{\"detail\":\"boom\"}"),
            GatewayError::Status {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
        assert_eq!(
            status_error(599, None, "  upstream exploded \n"),
            GatewayError::Status {
                status: 599,
                message: "upstream exploded".to_string()
            }
        );
        assert_eq!(
            status_error(599, None, ""),
            GatewayError::Status {
                status: 599,
                message: "Unknown".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_analyze_uploads_multipart_file() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"doc_id":"abc123","summary":"Quarterly results.","topics":[{"topic":"finance","text":"..."}],"name":"Jane Doe"}"#,
        )
        .await;
        let gateway = HttpAnalysisGateway::new(HttpGatewayConfig {
            base_url: base,
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let document = DocumentContent::new(b"%PDF-1.7".to_vec(), "report.pdf", "application/pdf");
        let analysis = gateway.analyze(&document).await.unwrap();

        assert_eq!(analysis.document_reference(), "abc123");
        assert_eq!(analysis.name.as_deref(), Some("Jane Doe"));
        assert_eq!(analysis.topics.len(), 1);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /api/analyze HTTP/1.1"));
        assert!(raw.contains("multipart/form-data"));
        assert!(raw.contains("name=\"file\""));
        assert!(raw.contains("filename=\"report.pdf\""));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/pdf"));
        assert!(raw.contains("%PDF-1.7"));
    }

    #[tokio::test]
    async fn test_chat_posts_json_question() {
        let (base, request) =
            serve_once("200 OK", r#"{"answer":"Revenue was $5M.","sources":[{"page":3}]}"#).await;
        let gateway = HttpAnalysisGateway::new(HttpGatewayConfig {
            base_url: base,
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let answer = gateway
            .chat(&ChatQuery {
                document_reference: "abc123".to_string(),
                question: "What was revenue?".to_string(),
                top_k: 5,
            })
            .await
            .unwrap();

        assert_eq!(answer.answer, "Revenue was $5M.");
        assert_eq!(answer.sources.len(), 1);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /api/chat HTTP/1.1"));
        let body = raw.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"doc_id": "abc123", "question": "What was revenue?", "top_k": 5})
        );
    }

    #[tokio::test]
    async fn test_error_status_maps_to_status_error() {
        let (base, _request) =
            serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let gateway = HttpAnalysisGateway::new(HttpGatewayConfig {
            base_url: base,
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let error = gateway
            .chat(&ChatQuery {
                document_reference: "abc123".to_string(),
                question: "q".to_string(),
                top_k: 5,
            })
            .await
            .unwrap_err();

        assert_eq!(
            error,
            GatewayError::Status {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (base, _request) = serve_once("200 OK", r#"{"unexpected": true}"#).await;
        let gateway = HttpAnalysisGateway::new(HttpGatewayConfig {
            base_url: base,
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let document = DocumentContent::new(b"x".to_vec(), "a.pdf", "application/pdf");
        let error = gateway.analyze(&document).await.unwrap_err();

        assert!(matches!(error, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unanswered_request_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        let gateway =
            HttpAnalysisGateway::new(config(&base, Duration::from_millis(200))).unwrap();

        let error = gateway
            .chat(&ChatQuery {
                document_reference: "d".to_string(),
                question: "q".to_string(),
                top_k: 1,
            })
            .await
            .unwrap_err();

        assert_eq!(error, GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        let gateway = HttpAnalysisGateway::new(config(&base, Duration::from_secs(5))).unwrap();

        let document = DocumentContent::new(b"x".to_vec(), "a.pdf", "application/pdf");
        let error = gateway.analyze(&document).await.unwrap_err();

        assert!(matches!(error, GatewayError::Connection(_)));
    }
}
