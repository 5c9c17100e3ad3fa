//! HTTP transport for the chatbot endpoints (POST send, GET history, POST clear).

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::{Endpoints, WidgetConfig};

/// Cookie holding the server-issued CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the token is echoed in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One stored turn from GET history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub conversation: Option<Vec<HistoryEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid base url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl TransportError {
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }

    fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Network(err)
        }
    }
}

/// The three calls the conversation controller makes. Implementations return
/// the decoded `{success, ...}` body; classification of failures is left to
/// the caller.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    async fn send(&self, message: &str) -> Result<SendResponse, TransportError>;
    async fn history(&self) -> Result<HistoryResponse, TransportError>;
    async fn clear(&self) -> Result<ClearResponse, TransportError>;
}

pub struct HttpTransport {
    base_url: Url,
    endpoints: Endpoints,
    jar: Arc<Jar>,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &WidgetConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| TransportError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let jar = Arc::new(Jar::default());
        for cookie in &config.cookies {
            jar.add_cookie_str(cookie, &base_url);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(TransportError::Network)?;
        Ok(Self {
            base_url,
            endpoints: config.endpoints.clone(),
            jar,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Current `csrftoken` cookie value, or empty when the server has not
    /// issued one yet.
    pub fn csrf_token(&self) -> String {
        self.jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().ok().map(str::to_owned))
            .and_then(|cookies| {
                cookies.split("; ").find_map(|pair| {
                    pair.strip_prefix(CSRF_COOKIE)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(str::to_owned)
                })
            })
            .unwrap_or_default()
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TransportError> {
        let resp = request
            .header(CSRF_HEADER, self.csrf_token())
            .send()
            .await
            .map_err(TransportError::from_send)?;
        debug!(status = %resp.status(), url = %resp.url(), "chatbot response");
        // Failures are reported in the body's `success` field, so the body is
        // decoded whatever the status code.
        resp.json::<T>().await.map_err(TransportError::from_body)
    }
}

impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<SendResponse, TransportError> {
        let body = serde_json::json!({ "message": message });
        let request = self.client.post(self.url(&self.endpoints.send)).json(&body);
        self.dispatch(request).await
    }

    async fn history(&self) -> Result<HistoryResponse, TransportError> {
        let request = self.client.get(self.url(&self.endpoints.history));
        self.dispatch(request).await
    }

    async fn clear(&self) -> Result<ClearResponse, TransportError> {
        let request = self.client.post(self.url(&self.endpoints.clear));
        self.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> HttpTransport {
        let config = WidgetConfig {
            base_url: server.uri(),
            request_timeout_secs: 5,
            ..WidgetConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    #[tokio::test]
    async fn send_posts_message_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/finance/chatbot/send/"))
            .and(body_json(serde_json::json!({ "message": "balance?" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "response": "**42**" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resp = transport_for(&server).send("balance?").await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.response.as_deref(), Some("**42**"));
        assert_eq!(resp.error, None);
    }

    #[tokio::test]
    async fn missing_cookie_sends_empty_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/finance/chatbot/clear/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
            )
            .mount(&server)
            .await;

        let resp = transport_for(&server).clear().await.unwrap();
        assert!(resp.success);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let token = requests[0].headers.get(CSRF_HEADER).unwrap();
        assert_eq!(token.to_str().unwrap(), "");
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn server_issued_cookie_becomes_csrf_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/finance/chatbot/history/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "csrftoken=tok123; Path=/")
                    .set_body_json(serde_json::json!({ "success": true, "conversation": [] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/finance/chatbot/send/"))
            .and(header(CSRF_HEADER, "tok123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "response": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let history = transport.history().await.unwrap();
        assert_eq!(history.conversation.map(|c| c.len()), Some(0));
        assert_eq!(transport.csrf_token(), "tok123");
        let resp = transport.send("hi").await.unwrap();
        assert_eq!(resp.response.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn seeded_cookie_is_used() {
        let server = MockServer::start().await;
        let config = WidgetConfig {
            base_url: server.uri(),
            cookies: vec!["csrftoken=seeded".into(), "sessionid=abc".into()],
            ..WidgetConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.csrf_token(), "seeded");
    }

    #[tokio::test]
    async fn error_status_body_is_still_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({ "success": false, "error": "Message cannot be empty" }),
            ))
            .mount(&server)
            .await;

        let resp = transport_for(&server).send("x").await.unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Message cannot be empty"));
    }

    #[tokio::test]
    async fn body_without_success_is_a_server_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "error": "Service unavailable" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let resp = transport.send("x").await.unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Service unavailable"));
        assert!(!transport.clear().await.unwrap().success);
        let history = transport.history().await.unwrap();
        assert!(!history.success);
        assert!(history.conversation.is_none());
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = transport_for(&server).history().await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        let config = WidgetConfig {
            base_url: server.uri(),
            request_timeout_secs: 1,
            ..WidgetConfig::default()
        };

        let err = HttpTransport::new(&config).unwrap().clear().await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout), "got {err:?}");
    }

    #[test]
    fn rejects_bad_base_url() {
        let config = WidgetConfig {
            base_url: "not a url".into(),
            ..WidgetConfig::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::InvalidUrl { .. })
        ));
    }
}
