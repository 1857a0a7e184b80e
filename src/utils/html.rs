use html2text::from_read;

use once_cell::sync::Lazy;
use regex::Regex;

static IMG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\s+[^>]*alt=["']([^"']*)["'][^>]*>"#).expect("valid image regex")
});

static EMBED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<(script|style|iframe)\b[^>]*>.*?</(script|style|iframe)>"#)
        .expect("valid embed regex")
});

/// Plain text for an article body delivered as HTML, wrapped at `width`.
///
/// Images become `[Image: alt]`; scripts, styles and embedded frames (share
/// widgets, video players) are dropped before conversion.
pub fn article_body_text(html: &str, width: usize) -> String {
    let stripped = EMBED_REGEX.replace_all(html, "");
    let with_placeholders = IMG_REGEX.replace_all(&stripped, "[Image: $1]");

    let mut bytes = with_placeholders.as_bytes();
    from_read(&mut bytes, width.max(20)).unwrap_or_default()
}
