pub mod auth;
pub mod chat;

use crate::models::auth::ApiErrorBody;
use log::debug;
use reqwest::header::{ HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE };
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::{ PoisonError, RwLock };
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Where the backend lives and how long a single request may take.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let invalid = |source: url::ParseError| ApiError::InvalidUrl { url: base_url.to_string(), source };
        let mut url = Url::parse(base_url.trim()).map_err(invalid)?;
        if url.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        // Url::join drops the last path segment unless the base ends with '/'.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base_url: url, timeout })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn endpoint(&self, route: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(route.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidUrl { url: route.to_string(), source })
    }
}

/// Shared HTTP transport: JSON headers, cookie credentials and the base URL.
///
/// The cookie jar lives inside the `reqwest::Client`, so dropping the
/// session token means swapping in a freshly built client.
pub struct ApiClient {
    config: ApiConfig,
    http: RwLock<reqwest::Client>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http: RwLock::new(http) })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn http(&self) -> reqwest::Client {
        self.http.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn reset_cookies(&self) -> Result<(), ApiError> {
        let fresh = build_http_client(&self.config)?;
        *self.http.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        debug!("Cookie store cleared");
        Ok(())
    }

    pub async fn post_json<B>(&self, route: &str, body: &B) -> Result<String, ApiError>
        where B: Serialize + ?Sized
    {
        let url = self.config.endpoint(route)?;
        debug!("POST {}", url);
        let resp = self.http().post(url).json(body).send().await?;
        read_body(resp).await
    }

    pub async fn get(&self, route: &str) -> Result<String, ApiError> {
        let url = self.config.endpoint(route)?;
        debug!("GET {}", url);
        let resp = self.http().get(url).send().await?;
        read_body(resp).await
    }
}

fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = reqwest::Client::builder().default_headers(headers).cookie_store(true);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

async fn read_body(resp: reqwest::Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body).ok().and_then(|b| b.message);
        debug!("Request rejected with {}: {}", status, body);
        return Err(ApiError::Status { status, message });
    }
    Ok(body)
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{ routing::{ get, post }, Json, Router };
    use serde_json::{ json, Value };

    #[test]
    fn endpoint_keeps_base_path() {
        let config = ApiConfig::new("http://localhost:8080/api/v1", None).unwrap();
        assert_eq!(
            config.endpoint("/chat-bot/question").unwrap().as_str(),
            "http://localhost:8080/api/v1/chat-bot/question"
        );

        let config = ApiConfig::new("http://localhost:8080/api/v1/", None).unwrap();
        assert_eq!(
            config.endpoint("auth/isAuth").unwrap().as_str(),
            "http://localhost:8080/api/v1/auth/isAuth"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(ApiConfig::new("not a url", None), Err(ApiError::InvalidUrl { .. })));
        assert!(
            matches!(ApiConfig::new("mailto:someone@example.com", None), Err(ApiError::InvalidUrl { .. }))
        );
    }

    #[tokio::test]
    async fn non_success_status_carries_server_message() {
        let router = Router::new().route(
            "/api/v1/boom",
            get(|| async {
                (
                    axum::http::StatusCode::CONFLICT,
                    Json(json!({ "status": 409, "error": "Conflict", "message": "Email já cadastrado" })),
                )
            })
        );
        let base = test_server::spawn(router).await;
        let api = ApiClient::new(ApiConfig::new(&base, None).unwrap()).unwrap();

        match api.get("/boom").await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(message.as_deref(), Some("Email já cadastrado"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let router = Router::new().route(
            "/api/v1/echo",
            post(|Json(body): Json<Value>| async move { Json(body) })
        );
        let base = test_server::spawn(router).await;
        let api = ApiClient::new(ApiConfig::new(&base, None).unwrap()).unwrap();

        let body = api.post_json("/echo", &json!({ "message": "oi" })).await.unwrap();
        let echoed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(echoed, json!({ "message": "oi" }));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ApiConfig::new(&format!("http://{}/api/v1", addr), None).unwrap();
        let api = ApiClient::new(config).unwrap();
        assert!(matches!(api.get("/auth/isAuth").await, Err(ApiError::Transport(_))));
    }
}
