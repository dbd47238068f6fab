use super::{ ApiClient, ApiError };
use crate::models::auth::{ LoginRequest, RegisterRequest };
use async_trait::async_trait;
use log::{ debug, info };
use std::sync::Arc;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const REGISTER_ROUTE: &str = "/auth/register";
pub const IS_AUTH_ROUTE: &str = "/auth/isAuth";

pub const LOGIN_FAILED: &str = "Erro ao fazer login. Tente novamente.";
pub const REGISTER_FAILED: &str = "Ocorreu um erro ao registrar. Tente novamente.";

/// Authentication boundary. The token itself never crosses it: the server
/// sets a cookie and the transport replays it.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    async fn is_authenticated(&self) -> bool;

    fn logout(&self) -> Result<(), ApiError>;
}

pub struct HttpAuthClient {
    api: Arc<ApiClient>,
}

impl HttpAuthClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.api.post_json(LOGIN_ROUTE, request).await?;
        info!("Logged in as {}", request.email);
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.api.post_json(REGISTER_ROUTE, request).await?;
        info!("Registered {}", request.email);
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        match self.api.get(IS_AUTH_ROUTE).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Authentication check failed: {}", e);
                false
            }
        }
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.api.reset_cookies()
    }
}

/// Text shown to the user when a login or registration attempt fails.
pub fn failure_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Status { message: Some(message), .. } if !message.trim().is_empty() => {
            message.clone()
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ test_server, ApiConfig };
    use axum::{
        http::{ header, HeaderMap, StatusCode },
        response::IntoResponse,
        routing::{ get, post },
        Json,
        Router,
    };
    use serde_json::{ json, Value };

    async fn login(Json(req): Json<LoginRequest>) -> impl IntoResponse {
        if req.password == "correct-horse" {
            (
                StatusCode::OK,
                [(header::SET_COOKIE, "token=signed-jwt; Path=/; HttpOnly")],
                "User logged in successfully",
            ).into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "status": 401, "error": "Unauthorized", "message": "Credenciais inválidas" })),
            ).into_response()
        }
    }

    async fn register(Json(body): Json<Value>) -> impl IntoResponse {
        let confirm = body.get("confirmPassword");
        if confirm.is_none() || confirm != body.get("password") {
            return StatusCode::BAD_REQUEST.into_response();
        }
        (
            StatusCode::OK,
            [(header::SET_COOKIE, "token=fresh-jwt; Path=/; HttpOnly")],
            "User registered successfully",
        ).into_response()
    }

    async fn is_auth(headers: HeaderMap) -> StatusCode {
        let has_token = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("token="))
            .unwrap_or(false);
        if has_token { StatusCode::OK } else { StatusCode::UNAUTHORIZED }
    }

    async fn auth_client() -> HttpAuthClient {
        let router = Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/auth/register", post(register))
            .route("/api/v1/auth/isAuth", get(is_auth));
        let base = test_server::spawn(router).await;
        let api = ApiClient::new(ApiConfig::new(&base, None).unwrap()).unwrap();
        HttpAuthClient::new(Arc::new(api))
    }

    fn credentials(password: &str) -> LoginRequest {
        LoginRequest { email: "ana@example.com".into(), password: password.into() }
    }

    #[tokio::test]
    async fn login_cookie_authenticates_until_logout() {
        let client = auth_client().await;
        assert!(!client.is_authenticated().await);

        client.login(&credentials("correct-horse")).await.unwrap();
        assert!(client.is_authenticated().await);

        client.logout().unwrap();
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn failed_login_surfaces_server_message() {
        let client = auth_client().await;
        let err = client.login(&credentials("wrong")).await.unwrap_err();

        assert_eq!(failure_message(&err, LOGIN_FAILED), "Credenciais inválidas");
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn register_sends_camel_case_fields() {
        let client = auth_client().await;
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "12345678".into(),
            confirm_password: "12345678".into(),
        };
        client.register(&req).await.unwrap();
        assert!(client.is_authenticated().await);

        let mismatched = RegisterRequest { confirm_password: "87654321".into(), ..req };
        let err = client.register(&mismatched).await.unwrap_err();
        assert_eq!(failure_message(&err, REGISTER_FAILED), REGISTER_FAILED);
    }
}
