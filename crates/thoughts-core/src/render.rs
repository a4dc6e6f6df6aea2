//! Pure post-to-render-description mapping.
//!
//! `render_post` turns a fetched [`Thought`] into a [`RenderedPost`] the UI
//! can paint however it likes. Keeping this a plain data transformation is
//! what makes the feed semantics testable without a live terminal.

use crate::content::{is_image_url, linkify, Segment};
use crate::thought::{PostedAt, Thought};
use chrono::{DateTime, Local, TimeZone};

/// `Month D, YYYY`
const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// How a post's body should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    /// The trimmed body is a bare image URL: show a thumbnail that follows
    /// the URL when activated.
    Image { url: String },
    /// Ordinary text, with URLs split into followable link segments.
    Text { segments: Vec<Segment> },
}

/// Render description of a single feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    pub content: PostContent,
    /// Long-form date line, e.g. "January 1, 2024". Falls back to the raw
    /// timestamp string when the server sends something unparseable.
    pub date: String,
}

impl RenderedPost {
    /// The URL this post leads to, if any. Image posts always have one;
    /// text posts yield their first link.
    pub fn primary_url(&self) -> Option<&str> {
        match &self.content {
            PostContent::Image { url } => Some(url),
            PostContent::Text { segments } => segments.iter().find_map(|s| match s {
                Segment::Link(url) => Some(url.as_str()),
                Segment::Text(_) => None,
            }),
        }
    }
}

/// Format a date as `Month D, YYYY`.
pub fn long_form_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(LONG_DATE_FORMAT).to_string()
}

/// Render a post for display in the viewer's local time zone.
pub fn render_post(thought: &Thought) -> RenderedPost {
    render_post_in(thought, &Local)
}

/// Render a post with an explicit time zone.
///
/// Classification works on the trimmed body; the text path keeps the
/// original body so surrounding whitespace survives verbatim.
pub fn render_post_in<Tz: TimeZone>(thought: &Thought, tz: &Tz) -> RenderedPost
where
    Tz::Offset: std::fmt::Display,
{
    let trimmed = thought.text.trim();

    let content = if is_image_url(trimmed) {
        PostContent::Image {
            url: trimmed.to_string(),
        }
    } else {
        PostContent::Text {
            segments: linkify(&thought.text),
        }
    };

    let date = match thought.posted_at() {
        Ok(PostedAt::Instant(utc)) => long_form_date(&utc.with_timezone(tz)),
        // Bare wall-clock stamps are shown as stamped, no offset applied.
        Ok(PostedAt::WallClock(naive)) => naive.format(LONG_DATE_FORMAT).to_string(),
        Err(_) => thought.timestamp.clone(),
    };

    RenderedPost { content, date }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_image_post() {
        let thought = Thought::new("  https://a.png  ", "2024-01-01T00:00:00Z");
        let rendered = render_post_in(&thought, &Utc);

        assert_eq!(
            rendered.content,
            PostContent::Image {
                url: "https://a.png".into()
            }
        );
        assert_eq!(rendered.date, "January 1, 2024");
        assert_eq!(rendered.primary_url(), Some("https://a.png"));
    }

    #[test]
    fn test_text_post_with_links() {
        let thought = Thought::new("read https://b.io/post now", "2024-12-25T12:00:00Z");
        let rendered = render_post_in(&thought, &Utc);

        match &rendered.content {
            PostContent::Text { segments } => {
                assert_eq!(segments.len(), 3);
                assert_eq!(segments[1], Segment::Link("https://b.io/post".into()));
            }
            other => panic!("expected text content, got {other:?}"),
        }
        assert_eq!(rendered.date, "December 25, 2024");
        assert_eq!(rendered.primary_url(), Some("https://b.io/post"));
    }

    #[test]
    fn test_plain_text_has_no_primary_url() {
        let thought = Thought::new("just words", "2024-05-05T00:00:00Z");
        let rendered = render_post_in(&thought, &Utc);
        assert_eq!(rendered.primary_url(), None);
    }

    #[test]
    fn test_unparseable_timestamp_falls_back_to_raw() {
        let thought = Thought::new("hello", "not-a-date");
        let rendered = render_post_in(&thought, &Utc);
        assert_eq!(rendered.date, "not-a-date");
    }

    #[test]
    fn test_day_is_not_zero_padded() {
        let thought = Thought::new("hello", "2024-03-09T00:00:00Z");
        let rendered = render_post_in(&thought, &Utc);
        assert_eq!(rendered.date, "March 9, 2024");
    }

    #[test]
    fn test_bare_timestamp_dated_as_stamped() {
        // No offset on the wire means no offset arithmetic on display,
        // whatever time zone the viewer is in.
        let thought = Thought::new("hello", "2024-07-04T23:59:59.000001");
        let in_utc = render_post_in(&thought, &Utc);
        let in_tokyo = render_post_in(&thought, &chrono::FixedOffset::east_opt(9 * 3600).unwrap());

        assert_eq!(in_utc.date, "July 4, 2024");
        assert_eq!(in_tokyo.date, "July 4, 2024");
    }
}
