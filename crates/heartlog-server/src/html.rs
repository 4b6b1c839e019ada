//! HTML rendering helpers.
//!
//! Pages are plain `format!` templates with inline CSS; there is no client
//! script. Every user-supplied string goes through [`escape`].

use axum::response::Html;
use heartlog_core::store::image::IMAGES_DIR;
use heartlog_core::time::format_date_korean;
use heartlog_core::{EmotionRecord, Memory};

/// Navigation entries: (path, label).
const NAV: [(&str, &str); 4] = [
    ("/", "🏠 홈"),
    ("/timeline", "📚 추억 타임라인"),
    ("/conversation", "💬 대화 분석"),
    ("/emotions", "📊 감정 히스토리"),
];

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; background: #fff5f7; color: #333; }
nav { background: #ff8fab; padding: 12px 20px; }
nav a { color: #fff; margin-right: 16px; text-decoration: none; font-weight: bold; }
nav a.active { text-decoration: underline; }
main { max-width: 820px; margin: 0 auto; padding: 20px; }
.card { background: #fff; border-radius: 12px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 4px rgba(0,0,0,.08); }
.card .date { color: #1565c0; font-weight: bold; }
.card h3 { margin: 6px 0; }
.card img { max-width: 100%; border-radius: 8px; margin-top: 8px; }
.label { color: #888; font-size: 13px; margin-top: 8px; }
.emotion { background: #f0f8ff; }
.emotion .reason { color: #757575; font-size: 14px; }
.info { background: #e3f2fd; padding: 12px; border-radius: 8px; }
.success { background: #e8f5e9; padding: 12px; border-radius: 8px; }
.error { background: #ffebee; color: #c62828; padding: 12px; border-radius: 8px; margin-bottom: 8px; }
textarea, input[type=text], input[type=date] { width: 100%; box-sizing: border-box; padding: 8px; }
button { background: #ff8fab; color: #fff; border: 0; padding: 8px 16px; border-radius: 8px; cursor: pointer; }
.legend span { display: inline-block; margin-right: 12px; }
footer { text-align: center; color: #aaa; font-size: 12px; padding: 20px; }
"#;

/// Escape text for element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text and keep its line breaks.
fn multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// Wrap `body` in the shared layout.
pub fn page(title: &str, active: &str, body: &str) -> Html<String> {
    let nav: String = NAV
        .iter()
        .map(|(path, label)| {
            let class = if *path == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", path, class, label)
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · heartlog</title>
<style>{STYLE}</style>
</head>
<body>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{body}
</main>
<footer>heartlog v{version}</footer>
</body>
</html>"#,
        title = escape(title),
        nav = nav,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
    ))
}

pub fn info(message: &str) -> String {
    format!("<p class=\"info\">{}</p>", escape(message))
}

pub fn errors(messages: &[&str]) -> String {
    messages
        .iter()
        .map(|m| format!("<div class=\"error\">{}</div>", escape(m)))
        .collect()
}

/// URL path for a stored image path such as `images/2024-06-01_x.jpg`.
pub fn image_url(relative: &str) -> String {
    let name = relative
        .strip_prefix(IMAGES_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(relative);
    let encoded = name.replace('%', "%25").replace('#', "%23");
    format!("/images/{}", escape(&encoded))
}

pub fn memory_card(memory: &Memory) -> String {
    let image = memory
        .image_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| format!("<img src=\"{}\" alt=\"{}\">", image_url(p), escape(&memory.title)))
        .unwrap_or_default();

    format!(
        r#"<div class="card">
<div class="date">{date}</div>
<h3>{title}</h3>
<div class="label">🌟 요약</div><div>{summary}</div>
<div class="label">💭 감정</div><div>{emotion}</div>
<div class="label">💌 공감 멘트</div><div>{empathy}</div>
<details><summary class="label">대화 내용</summary><div>{content}</div></details>
{image}
</div>"#,
        date = format_date_korean(&memory.date),
        title = escape(&memory.title),
        summary = multiline(&memory.summary),
        emotion = multiline(&memory.emotion),
        empathy = multiline(&memory.empathy),
        content = multiline(&memory.content),
        image = image,
    )
}

/// Cards for `memories`, or the empty-state notice.
pub fn memory_list(memories: &[Memory]) -> String {
    if memories.is_empty() {
        return info("아직 저장된 추억이 없어요! '대화 분석' 탭에서 새로운 추억을 만들어보세요.");
    }
    memories.iter().map(memory_card).collect()
}

pub fn emotion_card(record: &EmotionRecord) -> String {
    format!(
        r#"<div class="card emotion">
<div class="date">{}</div>
<div style="font-size: 18px; margin: 10px 0;">{}</div>
<div class="reason">{}</div>
</div>"#,
        format_date_korean(&record.date),
        escape(&record.emotion),
        escape(&record.reason),
    )
}
