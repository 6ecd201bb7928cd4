use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::chat;
use super::health;
use super::middleware::{cors_layer, logging_middleware};
use super::state::AppState;
use crate::config::CorsConfig;

/// Create the router with application state and the CORS policy
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        // Liveness and health (no gateway call)
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Chat
        .route("/chat", post(chat::chat))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{vars, GatewayConfig};
    use crate::domain::chat::ERROR_MARKER;
    use crate::infrastructure::llm::MockHttpClient;
    use crate::infrastructure::services::ChatGateway;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    const COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
    const FRONTEND: &str = "http://localhost:3000";

    fn app(client: MockHttpClient, env: &[(&str, &str)]) -> Router {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let gateway = ChatGateway::from_config(&GatewayConfig::from_env(&env), Arc::new(client));

        create_router(AppState::new(gateway), &CorsConfig::default())
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_sync_reply() {
        let client = MockHttpClient::new().with_post(
            COMPLETIONS_URL,
            json!({ "choices": [{ "message": { "content": "hi there" } }] }),
        );
        let app = app(client, &[(vars::OPENROUTER_API_KEY, "or-key")]);

        let response = app
            .oneshot(chat_request(r#"{"message": "hello", "mode": "sync"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(body_json(response).await, json!({ "response": "hi there" }));
    }

    #[tokio::test]
    async fn test_chat_blank_message_is_informational() {
        let app = app(MockHttpClient::new(), &[]);

        let response = app
            .oneshot(chat_request(r#"{"message": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_json(response).await["response"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(!text.is_empty());
        assert!(!text.starts_with(ERROR_MARKER));
    }

    #[tokio::test]
    async fn test_chat_missing_configuration_still_answers_200() {
        let app = app(MockHttpClient::new(), &[]);

        let response = app
            .oneshot(chat_request(r#"{"message": "hi", "mode": "async_job"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_json(response).await["response"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("RUNPOD"));
    }

    #[tokio::test]
    async fn test_chat_invalid_json_renders_error_reply() {
        let app = app(MockHttpClient::new(), &[]);

        let response = app.oneshot(chat_request("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_json(response).await["response"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.starts_with(ERROR_MARKER));
    }

    #[tokio::test]
    async fn test_root_liveness() {
        let app = app(MockHttpClient::new(), &[]);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Netabot backend is running" })
        );
    }

    #[tokio::test]
    async fn test_health_reports_degraded_modes() {
        let app = app(MockHttpClient::new(), &[(vars::OPENROUTER_API_KEY, "or-key")]);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["modes"]["sync"], true);
        assert_eq!(body["modes"]["async_job"], false);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_frontend() {
        let app = app(MockHttpClient::new(), &[]);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/chat")
                    .header(header::ORIGIN, FRONTEND)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            FRONTEND
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let app = app(MockHttpClient::new(), &[]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
