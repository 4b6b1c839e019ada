//! Photo file naming and path resolution.

use chrono::NaiveDate;
use std::path::{Component, Path, PathBuf};

/// Directory under the data dir holding uploaded photos.
pub const IMAGES_DIR: &str = "images";

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Byte budget for the title part of a photo filename. The date prefix and
/// extension keep the whole name well under the usual 255-byte limit.
pub const MAX_TITLE_BYTES: usize = 150;

/// Replace spaces and filesystem-unsafe characters with `_`, capped at
/// [`MAX_TITLE_BYTES`] on a char boundary.
pub fn sanitize_title(title: &str) -> String {
    let mut sanitized: String = title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.len() > MAX_TITLE_BYTES {
        let mut end = MAX_TITLE_BYTES;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
    }
    sanitized
}

/// File extension for an uploaded photo, sniffed from its bytes.
pub fn extension_for(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(PNG_SIGNATURE) {
        "png"
    } else {
        "jpg"
    }
}

/// Relative path recorded on the memory row, e.g. `images/2024-03-05_first_date.jpg`.
pub fn relative_image_path(date: NaiveDate, title: &str, bytes: &[u8]) -> String {
    format!(
        "{}/{}_{}.{}",
        IMAGES_DIR,
        date.format("%Y-%m-%d"),
        sanitize_title(title),
        extension_for(bytes)
    )
}

/// Resolve a stored relative path against the data dir.
///
/// Returns `None` for empty, absolute or parent-escaping paths.
pub fn resolve(data_dir: &Path, relative: &str) -> Option<PathBuf> {
    let relative = relative.trim();
    if relative.is_empty() {
        return None;
    }

    let path = Path::new(relative);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return None;
    }

    Some(data_dir.join(path))
}

/// Guess a MIME type from the file extension.
pub fn content_type(path: &str) -> &'static str {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("첫 데이트 기념"), "첫_데이트_기념");
        assert_eq!(sanitize_title("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_title("a:b*c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_title_caps_length() {
        // 3 bytes per char, 150 is a boundary
        let capped = sanitize_title(&"가".repeat(90));
        assert_eq!(capped, "가".repeat(50));

        // 2-byte prefix shifts the boundary, cut falls back a char
        let capped = sanitize_title(&format!("é{}", "가".repeat(90)));
        assert!(capped.len() <= MAX_TITLE_BYTES);
        assert_eq!(capped.len(), 149);
        assert!(capped.starts_with('é'));

        let short = "짧은 제목";
        assert_eq!(sanitize_title(short), "짧은_제목");
    }

    #[test]
    fn test_relative_image_path() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let jpeg = [0xff, 0xd8, 0xff, 0xe0];
        assert_eq!(
            relative_image_path(date, "first date", &jpeg),
            "images/2024-03-05_first_date.jpg"
        );

        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(&[0, 0, 0, 13]);
        assert_eq!(
            relative_image_path(date, "picnic", &png),
            "images/2024-03-05_picnic.png"
        );
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let base = Path::new("/data");
        assert_eq!(
            resolve(base, "images/a.jpg"),
            Some(PathBuf::from("/data/images/a.jpg"))
        );
        assert!(resolve(base, "").is_none());
        assert!(resolve(base, "   ").is_none());
        assert!(resolve(base, "../secret").is_none());
        assert!(resolve(base, "images/../../secret").is_none());
        assert!(resolve(base, "/etc/passwd").is_none());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("images/a.PNG"), "image/png");
        assert_eq!(content_type("images/a.jpg"), "image/jpeg");
    }
}
