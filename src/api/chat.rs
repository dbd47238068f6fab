use super::{ ApiClient, ApiError };
use crate::models::chat::{ QuestionRequest, QuestionResponse };
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub const QUESTION_ROUTE: &str = "/chat-bot/question";

#[async_trait]
pub trait QuestionClient: Send + Sync {
    async fn ask(&self, message: &str) -> Result<QuestionResponse, ApiError>;
}

pub struct HttpQuestionClient {
    api: Arc<ApiClient>,
}

impl HttpQuestionClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QuestionClient for HttpQuestionClient {
    async fn ask(&self, message: &str) -> Result<QuestionResponse, ApiError> {
        let req = QuestionRequest { message: message.to_string() };
        let body = self.api.post_json(QUESTION_ROUTE, &req).await?;
        let data = serde_json::from_str::<QuestionResponse>(&body).map_err(ApiError::Decode)?;
        debug!("Answer received (present: {})", data.answer.is_some());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ test_server, ApiConfig };
    use axum::{ http::StatusCode, routing::post, Json, Router };
    use serde_json::{ json, Value };

    async fn client_for(router: Router) -> HttpQuestionClient {
        let base = test_server::spawn(router).await;
        let api = ApiClient::new(ApiConfig::new(&base, None).unwrap()).unwrap();
        HttpQuestionClient::new(Arc::new(api))
    }

    #[tokio::test]
    async fn posts_message_and_reads_answer() {
        let router = Router::new().route(
            "/api/v1/chat-bot/question",
            post(|Json(body): Json<QuestionRequest>| async move {
                Json(json!({ "answer": format!("você disse: {}", body.message) }))
            })
        );
        let client = client_for(router).await;

        let resp = client.ask("Hello").await.unwrap();
        assert_eq!(resp.answer.as_deref(), Some("você disse: Hello"));
    }

    #[tokio::test]
    async fn missing_answer_is_not_an_error() {
        let router = Router::new().route(
            "/api/v1/chat-bot/question",
            post(|| async { Json(json!({ "sources": [] })) })
        );
        let client = client_for(router).await;

        let resp = client.ask("Hello").await.unwrap();
        assert!(resp.answer.is_none());
    }

    #[tokio::test]
    async fn server_error_and_garbage_body_fail() {
        let router = Router::new()
            .route(
                "/api/v1/chat-bot/question",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null)) })
            );
        let client = client_for(router).await;
        assert!(matches!(client.ask("Hello").await, Err(ApiError::Status { .. })));

        let router = Router::new().route(
            "/api/v1/chat-bot/question",
            post(|| async { "definitely not json" })
        );
        let client = client_for(router).await;
        assert!(matches!(client.ask("Hello").await, Err(ApiError::Decode(_))));
    }
}
