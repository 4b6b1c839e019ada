//! HTTP route modules.

pub mod api;
pub mod health;
pub mod media;
pub mod pages;

use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Uploads carry a photo, and the save form carries it again base64-encoded.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Handler error: status plus message body
pub type RouteError = (StatusCode, String);

/// Map a core error to a response: validation → 400, anything else → 500.
pub fn to_route_error(e: heartlog_core::Error) -> RouteError {
    match e {
        heartlog_core::Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
        other => {
            tracing::error!("Request failed: {}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(pages::router())
        .merge(media::router())
        .nest("/api", api::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use heartlog_core::analyzer::{CompletionClient, CompletionRequest, Field};
    use heartlog_core::{Analyzer, Config, Store};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::create_router;
    use crate::state::AppState;

    /// Answers every field with a fixed line; the emotion is always 행복.
    pub struct FixedClient;

    #[async_trait]
    impl CompletionClient for FixedClient {
        async fn complete(&self, request: &CompletionRequest) -> heartlog_core::Result<String> {
            let text = if request.system == Field::Summary.system_prompt() {
                "산책 이야기"
            } else if request.system == Field::Emotion.system_prompt() {
                "행복: 함께 웃음"
            } else {
                "따뜻한 하루네요."
            };
            Ok(text.to_string())
        }
    }

    pub struct TestApp {
        pub store: Store,
        state: Arc<AppState>,
        _dir: TempDir,
    }

    impl TestApp {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let mut config = Config::default();
            config.paths.data_dir = dir.path().join("data");

            let store = Store::open(&config.paths.data_dir).unwrap();
            let analyzer = Analyzer::new(Arc::new(FixedClient), config.analyzer.clone());
            let state = Arc::new(AppState::new(config, store.clone(), analyzer));

            Self {
                store,
                state,
                _dir: dir,
            }
        }

        pub async fn send(&self, request: Request<Body>) -> Response {
            create_router(self.state.clone())
                .oneshot(request)
                .await
                .unwrap()
        }

        pub async fn get(&self, uri: &str) -> Response {
            self.send(Request::get(uri).body(Body::empty()).unwrap())
                .await
        }
    }

    pub async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    pub async fn body_text(response: Response) -> String {
        String::from_utf8(body_bytes(response).await).unwrap()
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    /// Build a multipart/form-data body from text fields and an optional file.
    pub fn multipart(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
        let boundary = "heartlog-test-boundary";
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={boundary}"), body)
    }
}
