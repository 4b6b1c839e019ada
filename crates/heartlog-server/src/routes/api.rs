//! JSON API routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use heartlog_core::analyzer::validate_entry;
use heartlog_core::emotion::{build_distribution, ranked};
use heartlog_core::time::parse_date;
use heartlog_core::{Analysis, EmotionRecord, Memory, NewMemory, TodayWord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::pages::decode_image;
use super::{to_route_error, RouteError};
use crate::state::AppState;

/// Create API router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/memories", get(list_memories).post(create_memory))
        .route("/analyze", post(analyze))
        .route("/emotions", get(list_emotions))
        .route("/emotions/distribution", get(emotion_distribution))
        .route("/today-word", get(get_today_word).put(put_today_word))
}

// ─────────────────────────────────────────────────────────────────────────────
// Memories
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MemoryQuery {
    pub recent: Option<usize>,
    pub date: Option<String>,
}

/// List memories, newest first
pub async fn list_memories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MemoryQuery>,
) -> Result<Json<Vec<Memory>>, RouteError> {
    let mut memories = match query.date.as_deref() {
        Some(raw) => {
            let date = parse_date(raw).ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid date '{}', expected YYYY-MM-DD", raw),
                )
            })?;
            state.store.load_memories_by_date(date)
        }
        None => state.store.load_all_memories(),
    };

    if let Some(n) = query.recent {
        memories.truncate(n);
    }

    Ok(Json(memories))
}

#[derive(Debug, Deserialize)]
pub struct CreateMemoryRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub empathy: String,
    /// Base64-encoded photo
    #[serde(default)]
    pub image: Option<String>,
}

/// Save a memory dated today
pub async fn create_memory(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMemoryRequest>,
) -> Result<(StatusCode, Json<Memory>), RouteError> {
    validate_entry(&req.title, &req.content).map_err(to_route_error)?;
    let image = decode_image(req.image.as_deref().unwrap_or_default()).map_err(to_route_error)?;

    let memory = state
        .store
        .append_memory(NewMemory {
            title: req.title,
            content: req.content,
            summary: req.summary,
            emotion: req.emotion,
            empathy: req.empathy,
            image,
        })
        .map_err(to_route_error)?;

    Ok((StatusCode::CREATED, Json(memory)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub title: String,
    pub transcript: String,
}

/// Analyze a transcript without saving it
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Analysis>, RouteError> {
    validate_entry(&req.title, &req.transcript).map_err(to_route_error)?;
    Ok(Json(state.analyzer.analyze(&req.transcript).await))
}

// ─────────────────────────────────────────────────────────────────────────────
// Emotions
// ─────────────────────────────────────────────────────────────────────────────

/// List emotion records, oldest first
pub async fn list_emotions(State(state): State<Arc<AppState>>) -> Json<Vec<EmotionRecord>> {
    Json(state.store.load_all_emotions())
}

#[derive(Debug, Serialize)]
pub struct DistributionEntry {
    pub emotion: String,
    pub count: usize,
}

/// Canonical emotion counts, most frequent first
pub async fn emotion_distribution(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<DistributionEntry>> {
    let distribution = build_distribution(&state.store.load_all_emotions());
    let entries = ranked(&distribution)
        .into_iter()
        .map(|(emotion, count)| DistributionEntry { emotion, count })
        .collect();
    Json(entries)
}

// ─────────────────────────────────────────────────────────────────────────────
// Today-word
// ─────────────────────────────────────────────────────────────────────────────

pub async fn get_today_word(State(state): State<Arc<AppState>>) -> Json<TodayWord> {
    Json(state.store.load_today_word())
}

#[derive(Debug, Deserialize)]
pub struct TodayWordRequest {
    pub word: String,
}

pub async fn put_today_word(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TodayWordRequest>,
) -> Result<Json<TodayWord>, RouteError> {
    let saved = state
        .store
        .save_today_word(&req.word)
        .map_err(to_route_error)?;
    Ok(Json(saved))
}
