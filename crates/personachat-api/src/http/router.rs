//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/` except `/health`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/conversations/{session_id}",
            get(handlers::conversation::get_conversation),
        )
        .route(
            "/users/{user_id}/conversations",
            get(handlers::conversation::list_user_conversations),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use personachat_core::chat::service::CompletionSettings;
    use personachat_core::llm::box_provider::BoxLlmProvider;
    use personachat_core::llm::provider::LlmProvider;
    use personachat_infra::config::database_url;
    use personachat_infra::sqlite::character::SqliteCharacterRepository;
    use personachat_infra::sqlite::pool::DatabasePool;
    use personachat_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};
    use serde_json::Value;
    use tower::ServiceExt;

    struct StubProvider {
        reply: Option<&'static str>,
    }

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match self.reply {
                Some(text) => Ok(CompletionResponse {
                    content: text.to_string(),
                    model: "stub-model".to_string(),
                        usage: Usage {
                        input_tokens: 12,
                        output_tokens: 3,
                    },
                }),
                None => Err(LlmError::Provider {
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    /// Router over a fresh database seeded with the `bot-1` pirate.
    async fn test_router(reply: Option<&'static str>) -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url(dir.path())).await.unwrap();

        SqliteCharacterRepository::new(pool.clone())
            .upsert("bot-1", "You are a helpful pirate.", "Pirate")
            .await
            .unwrap();

        let state = AppState::new(
            pool,
            BoxLlmProvider::new(StubProvider { reply }),
            CompletionSettings::default(),
        );
        (build_router(state), dir)
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let response = router.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_chat_success_envelope() {
        let (router, _dir) = test_router(Some(" Ahoy!\n")).await;

        let response = router
            .oneshot(post_chat(
                r#"{"user_id":"u1","character_id":"bot-1","message":"Hello"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["message"], "Ahoy!");
        assert_eq!(body["status"]["code"], "success");
        assert!(body["status"]["execution_time"].as_f64().unwrap() >= 0.0);
        assert!(body["session_id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    }

    #[tokio::test]
    async fn test_chat_then_read_back_conversation() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let response = router
            .clone()
            .oneshot(post_chat(
                r#"{"user_id":"u1","character_id":"bot-1","message":"Hello"}"#,
            ))
            .await
            .unwrap();
        let session_id = read_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = router
            .clone()
            .oneshot(get_request(&format!("/api/v1/conversations/{session_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["character_id"], "bot-1");
        assert_eq!(body["created_at"], body["updated_at"]);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["type"], "user");
        assert_eq!(messages[0]["content"], "Hello");
        assert_eq!(messages[1]["type"], "character");
        assert_eq!(messages[1]["content"], "Ahoy!");

        let response = router
            .oneshot(get_request("/api/v1/users/u1/conversations?limit=10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["session_id"], session_id.as_str());
    }

    #[tokio::test]
    async fn test_chat_missing_fields_is_400() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let response = router
            .oneshot(post_chat(r#"{"user_id":"u1","message":""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(
            body["error"],
            "missing required parameters: character_id, message"
        );
    }

    #[tokio::test]
    async fn test_chat_malformed_json_is_400() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let response = router.oneshot(post_chat("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_chat_unknown_character_is_404() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let response = router
            .clone()
            .oneshot(post_chat(
                r#"{"user_id":"u1","character_id":"bot-9","message":"Hello"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = read_json(response).await;
        assert_eq!(body["error"], "character not found: bot-9");

        let response = router
            .oneshot(get_request("/api/v1/users/u1/conversations"))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_provider_failure_is_500_without_record() {
        let (router, _dir) = test_router(None).await;

        let response = router
            .clone()
            .oneshot(post_chat(
                r#"{"user_id":"u1","character_id":"bot-1","message":"Hello"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = read_json(response).await;
        assert_eq!(body["error"], "provider error: upstream unavailable");

        let response = router
            .oneshot(get_request("/api/v1/users/u1/conversations"))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_conversation_bad_uuid_is_400() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let response = router
            .oneshot(get_request("/api/v1/conversations/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_conversation_absent_is_404() {
        let (router, _dir) = test_router(Some("Ahoy!")).await;

        let id = uuid::Uuid::new_v4();
        let response = router
            .oneshot(get_request(&format!("/api/v1/conversations/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = read_json(response).await;
        assert_eq!(body["error"], format!("conversation not found: {id}"));
    }
}
