use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{Partitions, SearchRequest, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://so.252035.xyz";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("backend error (code {code}): {message}")]
    Application { code: i64, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over the aggregator's search endpoint.
/// Implemented by `PanSouClient` for production; mock implementations used in tests.
pub trait PanSearch {
    async fn search(&self, keyword: &str) -> Result<Partitions, BackendError>;
}

#[derive(Debug, Clone)]
pub struct PanSouClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl PanSouClient {
    /// `base_url` must not end with `/`.
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(http: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            timeout,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Network(e)
        }
    }
}

impl PanSearch for PanSouClient {
    async fn search(&self, keyword: &str) -> Result<Partitions, BackendError> {
        let url = format!("{}/api/search", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(&SearchRequest { kw: keyword })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "pansou search failed");
            return Err(BackendError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let body: SearchResponse = serde_json::from_str(&text)?;
        if body.code != 0 {
            let message = body.message.unwrap_or_default();
            warn!(code = body.code, %message, "pansou returned application error");
            return Err(BackendError::Application {
                code: body.code,
                message,
            });
        }

        let partitions = body.into_partitions();
        debug!(keyword, groups = partitions.0.len(), "pansou search complete");
        Ok(partitions)
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> PanSouClient {
        PanSouClient::new(Client::new(), &server.uri())
    }

    #[tokio::test]
    async fn search_posts_keyword_and_returns_partitions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .and(body_json(serde_json::json!({"kw": "流浪地球"})))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": {"merged_by_type": {
                    "quark": [{
                        "url": "https://pan.quark.cn/s/abc",
                        "note": "流浪地球2 4K",
                        "datetime": "2024-05-01T10:20:30Z",
                        "source": "tg:quarkshare"
                    }],
                    "aliyun": []
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let partitions = client(&server).search("流浪地球").await.unwrap();

        assert_eq!(partitions.0.len(), 2);
        let (id, items) = &partitions.0[0];
        assert_eq!(id, "quark");
        assert_eq!(items[0].url.as_deref(), Some("https://pan.quark.cn/s/abc"));
        assert_eq!(items[0].source.as_deref(), Some("tg:quarkshare"));
    }

    #[tokio::test]
    async fn search_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let result = client(&server).search("test").await;
        assert!(matches!(result, Err(BackendError::Status(502))));
    }

    #[tokio::test]
    async fn search_nonzero_code_is_application_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 500,
                "message": "search engine busy"
            })))
            .mount(&server)
            .await;

        match client(&server).search("test").await {
            Err(BackendError::Application { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "search engine busy");
            }
            other => panic!("expected application error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_invalid_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let result = client(&server).search("test").await;
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[tokio::test]
    async fn search_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"code": 0}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client =
            PanSouClient::with_timeout(Client::new(), &server.uri(), Duration::from_millis(100));
        let result = client.search("test").await;
        assert!(matches!(result, Err(BackendError::Timeout(_))), "got: {result:?}");
    }

    #[tokio::test]
    async fn search_unreachable_backend_is_network_error() {
        let client = PanSouClient::new(Client::new(), "http://127.0.0.1:1");
        let result = client.search("test").await;
        assert!(matches!(result, Err(BackendError::Network(_))), "got: {result:?}");
    }
}
