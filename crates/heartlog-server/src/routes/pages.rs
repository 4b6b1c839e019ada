//! HTML page routes.
//!
//! Each page is chosen by its route; nothing about the current view is kept
//! on the server between requests.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use heartlog_core::analyzer::{missing_fields, validate_entry};
use heartlog_core::emotion::{build_distribution, ranked};
use heartlog_core::store::image::{content_type, extension_for};
use heartlog_core::time::parse_date;
use heartlog_core::NewMemory;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{to_route_error, RouteError};
use crate::html::{self, escape};
use crate::state::AppState;

/// Create page router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/today-word", post(save_today_word))
        .route("/timeline", get(timeline))
        .route("/conversation", get(conversation_form))
        .route("/conversation/analyze", post(analyze_conversation))
        .route("/conversation/save", post(save_conversation))
        .route("/emotions", get(emotions))
}

// ─────────────────────────────────────────────────────────────────────────────
// Home
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub saved: Option<String>,
}

/// Today-word editor and the three most recent memories
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Html<String> {
    let today_word = state.store.load_today_word();
    let recent = state.store.load_recent_memories(3);

    let notice = if query.saved.is_some() {
        "<p class=\"success\">오늘의 한마디가 저장되었습니다! 💕</p>"
    } else {
        ""
    };

    let body = format!(
        r#"<h2>💌 오늘의 한마디</h2>
{notice}
<form method="post" action="/today-word">
<label for="word">오늘 하고 싶은 말을 적어보세요:</label>
<textarea id="word" name="word" rows="4">{word}</textarea>
<button type="submit">저장하기</button>
</form>
<h2>✨ 최근 추억</h2>
{memories}"#,
        notice = notice,
        word = escape(&today_word.word),
        memories = html::memory_list(&recent),
    );

    html::page("홈", "/", &body)
}

#[derive(Debug, Deserialize)]
pub struct TodayWordForm {
    #[serde(default)]
    pub word: String,
}

/// Save the today-word and return to the home page
pub async fn save_today_word(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TodayWordForm>,
) -> Result<Redirect, RouteError> {
    state
        .store
        .save_today_word(&form.word)
        .map_err(to_route_error)?;

    info!("Today-word saved");
    Ok(Redirect::to("/?saved=1"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Timeline
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub date: Option<String>,
    pub saved: Option<String>,
}

/// All memories, or those of one day when `date` is given
pub async fn timeline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimelineQuery>,
) -> Html<String> {
    let requested = query.date.as_deref().map(str::trim).filter(|d| !d.is_empty());

    let mut notices = String::new();
    if query.saved.is_some() {
        notices.push_str("<p class=\"success\">추억이 저장되었습니다! 💕</p>");
    }

    let memories = match requested.map(|d| (d, parse_date(d))) {
        Some((_, Some(date))) => state.store.load_memories_by_date(date),
        Some((raw, None)) => {
            let message = format!("날짜 형식이 올바르지 않습니다: {} (YYYY-MM-DD)", raw);
            notices.push_str(&html::errors(&[message.as_str()]));
            state.store.load_all_memories()
        }
        None => state.store.load_all_memories(),
    };

    let body = format!(
        r#"<form method="get" action="/timeline">
<input type="date" name="date" value="{date}">
<button type="submit">날짜로 보기</button> <a href="/timeline">전체 보기</a>
</form>
{notices}
{memories}"#,
        date = escape(requested.unwrap_or_default()),
        notices = notices,
        memories = html::memory_list(&memories),
    );

    html::page("📚 추억 타임라인", "/timeline", &body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversation
// ─────────────────────────────────────────────────────────────────────────────

fn conversation_body(title: &str, transcript: &str, errors: &[&str]) -> String {
    format!(
        r#"<p>대화 내용을 입력하면 AI가 다음을 생성합니다:</p>
<ol><li>따뜻한 요약</li><li>감정 분석</li><li>공감 멘트</li></ol>
{errors}
<form method="post" action="/conversation/analyze" enctype="multipart/form-data">
<label for="title">추억의 제목:</label>
<input type="text" id="title" name="title" value="{title}">
<label for="transcript">대화 내용을 입력하세요:</label>
<textarea id="transcript" name="transcript" rows="10">{transcript}</textarea>
<label for="image">이미지 추가하기 (선택사항)</label>
<input type="file" id="image" name="image" accept="image/png,image/jpeg">
<button type="submit">분석하기</button>
</form>"#,
        errors = html::errors(errors),
        title = escape(title),
        transcript = escape(transcript),
    )
}

/// Transcript entry form
pub async fn conversation_form() -> Html<String> {
    html::page("💬 대화 분석", "/conversation", &conversation_body("", "", &[]))
}

#[derive(Debug, Default)]
struct ConversationUpload {
    title: String,
    transcript: String,
    image: Option<Vec<u8>>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ConversationUpload, RouteError> {
    let mut upload = ConversationUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" | "transcript" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                if name == "title" {
                    upload.title = text;
                } else {
                    upload.transcript = text;
                }
            }
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                if !bytes.is_empty() {
                    upload.image = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Run the analyzer and show the results with a save form
pub async fn analyze_conversation(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, RouteError> {
    let upload = read_upload(multipart).await?;

    let missing = missing_fields(&upload.title, &upload.transcript);
    if !missing.is_empty() {
        let page = html::page(
            "💬 대화 분석",
            "/conversation",
            &conversation_body(&upload.title, &upload.transcript, &missing),
        );
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    info!(title = %upload.title, "Analyzing conversation");
    let analysis = state.analyzer.analyze(&upload.transcript).await;

    let (preview, encoded_image) = match upload.image.as_deref() {
        Some(bytes) => {
            let encoded = BASE64.encode(bytes);
            let mime = content_type(&format!("upload.{}", extension_for(bytes)));
            (
                format!(
                    "<img src=\"data:{};base64,{}\" alt=\"업로드된 이미지\" style=\"max-width:100%\">",
                    mime, encoded
                ),
                encoded,
            )
        }
        None => (String::new(), String::new()),
    };

    let body = format!(
        r#"<p class="success">대화 분석이 완료되었습니다!</p>
<div class="card">
<h3>{title}</h3>
<div class="label">🌟 요약</div><div>{summary}</div>
<div class="label">💭 감정 분석</div><div>{emotion}</div>
<div class="label">💌 공감 멘트</div><div>{empathy}</div>
{preview}
</div>
<form method="post" action="/conversation/save">
<input type="hidden" name="title" value="{title}">
<input type="hidden" name="content" value="{content}">
<input type="hidden" name="summary" value="{summary}">
<input type="hidden" name="emotion" value="{emotion}">
<input type="hidden" name="empathy" value="{empathy}">
<input type="hidden" name="image" value="{image}">
<button type="submit">추억으로 저장하기</button>
</form>"#,
        title = escape(&upload.title),
        summary = escape(&analysis.summary),
        emotion = escape(&analysis.emotion),
        empathy = escape(&analysis.empathy),
        content = escape(&upload.transcript),
        preview = preview,
        image = encoded_image,
    );

    Ok(html::page("💬 대화 분석", "/conversation", &body).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub empathy: String,
    /// Base64 photo bytes; empty when no photo was uploaded
    #[serde(default)]
    pub image: String,
}

/// Decode an optional base64 photo field.
pub fn decode_image(encoded: &str) -> heartlog_core::Result<Option<Vec<u8>>> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Ok(None);
    }
    BASE64
        .decode(encoded)
        .map(Some)
        .map_err(|e| heartlog_core::Error::Validation(format!("이미지 데이터가 올바르지 않습니다: {}", e)))
}

/// Persist an analyzed conversation and go to the timeline
pub async fn save_conversation(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveForm>,
) -> Result<Redirect, RouteError> {
    validate_entry(&form.title, &form.content).map_err(to_route_error)?;
    let image = decode_image(&form.image).map_err(to_route_error)?;

    state
        .store
        .append_memory(NewMemory {
            title: form.title,
            content: form.content,
            summary: form.summary,
            emotion: form.emotion,
            empathy: form.empathy,
            image,
        })
        .map_err(to_route_error)?;

    Ok(Redirect::to("/timeline?saved=1"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Emotions
// ─────────────────────────────────────────────────────────────────────────────

/// Emotion chart and the per-day emotion records
pub async fn emotions(State(state): State<Arc<AppState>>) -> Html<String> {
    let records = state.store.load_all_emotions();

    if records.is_empty() {
        return html::page(
            "📊 감정 히스토리",
            "/emotions",
            &html::info("아직 감정 기록이 없어요! '대화 분석' 탭에서 대화를 통해 감정을 기록해보세요."),
        );
    }

    let legend: String = ranked(&build_distribution(&records))
        .iter()
        .enumerate()
        .map(|(i, (label, count))| format!("<span>{}. {} ({})</span>", i + 1, escape(label), count))
        .collect();

    let cards: String = records.iter().map(html::emotion_card).collect();

    let body = format!(
        r#"<img src="/emotions/chart.png" alt="감정 분포" style="max-width:100%">
<div class="legend">{legend}</div>
<h2>감정 기록</h2>
{cards}"#,
        legend = legend,
        cards = cards,
    );

    html::page("📊 감정 히스토리", "/emotions", &body)
}
