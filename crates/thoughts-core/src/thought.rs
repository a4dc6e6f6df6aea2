//! The `Thought` model - a single posted message or image entry.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post as the server returns it.
///
/// Immutable once fetched; the client only ever holds the posts of the
/// currently displayed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    /// Raw post body. May be plain text, text with URLs, or a bare image URL.
    pub text: String,
    /// Server-issued ISO-8601 timestamp, with or without an offset.
    pub timestamp: String,
}

/// A post's point in time as recovered from its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostedAt {
    /// The timestamp carried an explicit offset: a real instant, shown in
    /// the viewer's time zone.
    Instant(DateTime<Utc>),
    /// A bare wall-clock timestamp (the server's `isoformat` output).
    /// Shown exactly as stamped, with no offset arithmetic applied.
    WallClock(NaiveDateTime),
}

impl Thought {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Parse the post's timestamp.
    ///
    /// Accepts full RFC 3339 (`2024-01-01T00:00:00Z`, offset forms) as
    /// well as bare `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
    pub fn posted_at(&self) -> Result<PostedAt> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Ok(PostedAt::Instant(dt.with_timezone(&Utc)));
        }

        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .map(PostedAt::WallClock)
            .map_err(|_| Error::Timestamp(self.timestamp.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parses_rfc3339_with_zulu() {
        let thought = Thought::new("hi", "2024-01-01T00:00:00Z");
        assert_eq!(
            thought.posted_at().unwrap(),
            PostedAt::Instant(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parses_offset_form() {
        let thought = Thought::new("hi", "2024-06-15T10:30:00+02:00");
        assert_eq!(
            thought.posted_at().unwrap(),
            PostedAt::Instant(Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parses_bare_isoformat_as_wall_clock() {
        // datetime.utcnow().isoformat() carries no offset
        let thought = Thought::new("hi", "2024-03-09T18:05:42.123456");
        match thought.posted_at().unwrap() {
            PostedAt::WallClock(naive) => {
                assert_eq!(
                    naive.date(),
                    chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
                );
                assert_eq!(naive.and_utc().timestamp_subsec_micros(), 123456);
            }
            other => panic!("expected wall-clock timestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_parses_bare_isoformat_without_fraction() {
        let thought = Thought::new("hi", "2024-03-09T18:05:42");
        assert!(matches!(
            thought.posted_at(),
            Ok(PostedAt::WallClock(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let thought = Thought::new("hi", "yesterday-ish");
        assert!(matches!(thought.posted_at(), Err(Error::Timestamp(_))));
    }
}
