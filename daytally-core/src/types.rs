//! Core domain types for daytally
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Record** | One raw activity entry: a start timestamp plus a duration |
//! | **Segment** | The part of a record confined to a single calendar day |
//! | **Category** | The top-level grouping a record belongs to (e.g. "Work") |
//! | **Activity** | The optional finer-grained name inside a category |
//!
//! All timestamps are naive local wall-clock time. Any timezone offset in
//! source data is dropped by the loader before a record is built.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

// ============================================
// Activity Record
// ============================================

/// A single logged activity as delivered by a loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Category name (never empty once past the loader)
    pub category: String,
    /// Activity name, when the source carries one
    pub name: Option<String>,
    /// Start time, local wall clock
    pub start: NaiveDateTime,
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Free-text note
    pub note: Option<String>,
}

impl ActivityRecord {
    pub fn new(category: impl Into<String>, start: NaiveDateTime, duration_ms: f64) -> Self {
        Self {
            category: category.into(),
            name: None,
            start,
            duration_ms,
            note: None,
        }
    }

    /// Builder-style setter for the activity name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style setter for the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Duration in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_ms / MS_PER_HOUR
    }
}

// ============================================
// Day Segment
// ============================================

/// The portion of one [`ActivityRecord`] that falls on a single calendar day.
///
/// `[start, end)` never crosses midnight, and `date == start.date()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySegment {
    pub date: NaiveDate,
    pub category: String,
    pub name: Option<String>,
    pub note: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_hours: f64,
}

/// Whether the source data carried activity-level detail (names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityDetail {
    Available,
    #[default]
    Unavailable,
}

impl ActivityDetail {
    pub fn is_available(&self) -> bool {
        matches!(self, ActivityDetail::Available)
    }
}

/// Every segment derived from one load, in record order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSet {
    pub segments: Vec<DaySegment>,
    pub detail: ActivityDetail,
}

impl SegmentSet {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Latest segment date, if any.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.segments.iter().map(|s| s.date).max()
    }

    /// Earliest segment date, if any.
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.segments.iter().map(|s| s.date).min()
    }

    /// Total hours across every segment.
    pub fn total_hours(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_record_builder() {
        let record = ActivityRecord::new("Work", at("2024-01-01", "09:00"), 5_400_000.0)
            .with_name("Email")
            .with_note("inbox zero");
        assert_eq!(record.name.as_deref(), Some("Email"));
        assert_eq!(record.note.as_deref(), Some("inbox zero"));
        assert!((record.duration_hours() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_segment_set_bounds() {
        let seg = |d: &str, h: f64| DaySegment {
            date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            category: "Work".to_string(),
            name: None,
            note: None,
            start: at(d, "00:00"),
            end: at(d, "01:00"),
            duration_hours: h,
        };
        let set = SegmentSet {
            segments: vec![seg("2024-03-02", 1.0), seg("2024-02-28", 2.5)],
            detail: ActivityDetail::Unavailable,
        };
        assert_eq!(set.len(), 2);
        assert_eq!(set.max_date(), NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(set.min_date(), NaiveDate::from_ymd_opt(2024, 2, 28));
        assert_eq!(set.total_hours(), 3.5);
        assert!(SegmentSet::default().max_date().is_none());
    }
}
