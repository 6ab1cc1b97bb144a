//! crates/storybook_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, TimeZone};
use std::fmt;

/// Label prefixed to the timestamp when a book is generated without a title.
pub const DEFAULT_TITLE_LABEL: &str = "كتاب أطفال";

/// A generated children's book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub content: String,
}

/// The creation instant of a book, rendered as a fixed-width `YYYYMMDDHHMMSS` string.
///
/// Fixed width means lexicographic order of stamps equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BookStamp(String);

impl BookStamp {
    pub const FORMAT: &'static str = "%Y%m%d%H%M%S";

    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(at.format(Self::FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The title given to a book generated without one.
    pub fn default_title(&self) -> String {
        format!("{} {}", DEFAULT_TITLE_LABEL, self.0)
    }
}

impl fmt::Display for BookStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn stamp_is_fourteen_zero_padded_digits() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let stamp = BookStamp::from_datetime(&at);
        assert_eq!(stamp.as_str(), "20240102030405");
        assert_eq!(stamp.as_str().len(), 14);
    }

    #[test]
    fn stamp_uses_the_wall_clock_of_its_offset() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(BookStamp::from_datetime(&at).to_string(), "20240615120000");
    }

    #[test]
    fn default_title_carries_the_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let title = BookStamp::from_datetime(&at).default_title();
        assert_eq!(title, "كتاب أطفال 20240615120000");
    }

    #[test]
    fn stamps_order_chronologically() {
        let earlier = BookStamp::from_datetime(&Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap());
        let later = BookStamp::from_datetime(&Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
        assert!(earlier < later);
    }
}
