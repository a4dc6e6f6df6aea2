//! Post content classification and URL auto-linking.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"https?://\S+").unwrap();
}

/// File suffixes that mark a post as a directly embeddable image.
const IMAGE_SUFFIXES: [&str; 6] = [".jpeg", ".jpg", ".gif", ".png", ".webp", ".avif"];

/// Whether a post body is a bare image URL.
///
/// True when the string ends (case-insensitively) in a known image
/// extension, or carries an explicit `format=jpg` / `format=png` query
/// marker the way some CDNs (e.g. Twitter's) serve images without an
/// extension.
pub fn is_image_url(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return true;
    }

    text.contains("format=jpg") || text.contains("format=png")
}

/// A run of post text: either literal characters or a linkable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, passed through unmodified - never reinterpreted as markup.
    Text(String),
    /// An `http(s)://` URL to be presented as a followable link.
    Link(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(s) | Segment::Link(s) => s,
        }
    }
}

/// Split text into literal and link segments.
///
/// Every substring matching `https?://\S+` becomes a [`Segment::Link`];
/// everything between stays verbatim and in place, so joining the segments
/// reproduces the input exactly.
pub fn linkify(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for m in URL_PATTERN.find_iter(text) {
        if m.start() > last_end {
            segments.push(Segment::Text(text[last_end..m.start()].to_string()));
        }
        segments.push(Segment::Link(m.as_str().to_string()));
        last_end = m.end();
    }

    if last_end < text.len() {
        segments.push(Segment::Text(text[last_end..].to_string()));
    }

    segments
}
