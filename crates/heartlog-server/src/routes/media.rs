//! Binary responses: stored photos and the emotion chart.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use heartlog_core::emotion::{build_distribution, render_chart, ChartStyle};
use heartlog_core::store::image::{content_type, IMAGES_DIR};
use std::sync::Arc;

use super::{to_route_error, RouteError};
use crate::state::AppState;

/// Create media router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images/{*path}", get(get_image))
        .route("/emotions/chart.png", get(emotion_chart))
}

/// Serve a stored photo by its name under images/
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, RouteError> {
    let relative = format!("{}/{}", IMAGES_DIR, path);
    let bytes = state
        .store
        .load_image(Some(&relative))
        .ok_or((StatusCode::NOT_FOUND, "Image not found".to_string()))?;

    Ok(([(header::CONTENT_TYPE, content_type(&relative))], bytes))
}

/// Render the emotion distribution as a PNG
pub async fn emotion_chart(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, RouteError> {
    let distribution = build_distribution(&state.store.load_all_emotions());
    let png = render_chart(&distribution, &ChartStyle::default()).map_err(to_route_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    ))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{body_bytes, TestApp};
    use axum::http::{header, StatusCode};
    use chrono::NaiveDate;
    use heartlog_core::NewMemory;

    #[tokio::test]
    async fn test_missing_image_is_404() {
        let app = TestApp::new();
        let response = app.get("/images/nope.jpg").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_escaping_image_path_is_404() {
        let app = TestApp::new();
        let response = app.get("/images/..%2Fmemories.json").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stored_image_served() {
        let app = TestApp::new();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let memory = app
            .store
            .append_memory_on(
                date,
                NewMemory {
                    title: "picnic".into(),
                    content: "A: 소풍".into(),
                    image: Some(vec![0xff, 0xd8, 0xff]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            memory.image_path.as_deref(),
            Some("images/2024-05-01_picnic.jpg")
        );

        let response = app.get("/images/2024-05-01_picnic.jpg").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(body_bytes(response).await, vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_chart_is_png() {
        let app = TestApp::new();
        app.store
            .upsert_emotion(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), "행복", "r")
            .unwrap();

        let response = app.get("/emotions/chart.png").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = body_bytes(response).await;
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
