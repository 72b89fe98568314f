use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// HTTP client bound to one [`ClientConfig`].
///
/// Cloning is cheap and clones share the connection pool, so a single
/// instance can be built at startup and handed to every call site.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Builds a client from `config`. Performs no network I/O.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("swapi-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Build)?;
        Ok(Self { inner, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves `path` against the base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(self.config.base_url(), path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "preparing request");
        self.inner.request(method, url)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }

    /// GETs `path` and decodes a JSON body, mapping failures to [`ApiError`].
    pub async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send_json(self.get(path), path).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send_json(self.get(path).query(query), path).await
    }

    async fn send_json<T>(&self, request: RequestBuilder, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let resp = request
            .send()
            .await
            .map_err(|e| self.classify(e, &url))?;
        let resp = check_status(resp).await?;
        let body = resp.bytes().await.map_err(|e| self.classify(e, &url))?;
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    /// `url` is used only when reqwest did not record the request URL.
    fn classify(&self, err: reqwest::Error, url: &str) -> ApiError {
        let url = err.url().map_or_else(|| url.to_string(), |u| u.to_string());
        if err.is_timeout() {
            ApiError::Timeout {
                url,
                timeout_ms: self.config.timeout_millis(),
            }
        } else if err.is_builder() {
            ApiError::InvalidUrl {
                url,
                reason: err.to_string(),
            }
        } else {
            ApiError::Transport(err)
        }
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    debug!(%status, url = %resp.url(), "non-success response");
    Err(ApiError::Status {
        status,
        body: resp.text().await.unwrap_or_default(),
    })
}

/// Joins `path` onto `base`.
///
/// Absolute URLs (`scheme://...` or `//host/...`) bypass the base entirely.
pub fn join_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    if path.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_absolute_url(path: &str) -> bool {
    if path.starts_with("//") {
        return true;
    }
    let Some((scheme, rest)) = path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid_scheme && rest.starts_with("//")
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(ClientConfig::with_base_url(Some(base.to_string()))).unwrap()
    }

    #[test]
    fn join_url_inserts_single_separator() {
        assert_eq!(join_url("http://h/api", "people"), "http://h/api/people");
        assert_eq!(join_url("http://h/api/", "/people"), "http://h/api/people");
        assert_eq!(join_url("http://h/api//", "people"), "http://h/api/people");
        assert_eq!(join_url("http://h/api", "/people?page=2"), "http://h/api/people?page=2");
    }

    #[test]
    fn join_url_keeps_base_for_empty_path() {
        assert_eq!(join_url("http://h/api/", ""), "http://h/api/");
    }

    #[test]
    fn join_url_passes_absolute_urls_through() {
        assert_eq!(
            join_url("http://h/api", "https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(join_url("http://h/api", "//cdn.example/x"), "//cdn.example/x");
        assert_eq!(join_url("http://h/api", "git+ssh://repo"), "git+ssh://repo");
    }

    #[test]
    fn join_url_treats_colon_paths_as_relative() {
        assert_eq!(join_url("http://h/api", "a:b"), "http://h/api/a:b");
        assert_eq!(join_url("http://h/api", "1http://x"), "http://h/api/1http://x");
    }

    #[test]
    fn client_exposes_its_config() {
        let client = client_for("https://api.example.com/v1");
        assert_eq!(client.config().base_url(), "https://api.example.com/v1");
        assert_eq!(client.config().timeout_millis(), 15_000);
        assert_eq!(client.url("planets"), "https://api.example.com/v1/planets");
    }

    #[test]
    fn clones_share_configuration() {
        let client = client_for("https://api.example.com/v1");
        let clone = client.clone();
        assert_eq!(client.config(), clone.config());
    }

    #[tokio::test]
    async fn raw_verbs_prefix_the_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/things/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/api", server.uri()));
        let resp = client.delete("/things/7").send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn get_json_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(query_param("verbose", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/api/", server.uri()));
        let body: Value = client
            .get_json_with_query("ping", &[("verbose", "1")])
            .await
            .unwrap();
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn get_json_reports_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.get_json::<Value>("anything").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        match err {
            ApiError::Status { body, .. } => assert_eq!(body, "down for maintenance"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_json_reports_decode_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.get_json::<Value>("anything").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
        assert_eq!(err.to_string(), "failed to decode response body");
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::with_base_url(Some(server.uri()))
            .with_timeout(Duration::from_millis(50));
        let client = ApiClient::new(config).unwrap();
        let err = client
            .get_json_with_query::<Value, _>("slow", &[("page", "2")])
            .await
            .unwrap_err();
        match err {
            ApiError::Timeout { url, timeout_ms } => {
                assert!(url.ends_with("/slow?page=2"), "got {url}");
                assert_eq!(timeout_ms, 50);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is closed on test hosts.
        let client = client_for("http://127.0.0.1:9");
        let err = client.get_json::<Value>("x").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");

        let cause = err.source().map(|e| e.to_string()).unwrap_or_default();
        assert_eq!(err.to_string(), "request failed");
        assert!(!cause.is_empty());
        assert!(!err.to_string().contains(&cause));
    }
}
