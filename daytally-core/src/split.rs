//! Splitting activity records at midnight boundaries.
//!
//! A record that runs past midnight is cut into one [`DaySegment`] per
//! calendar day it touches. The hours across a record's segments always add
//! back up to the record's duration.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::types::{ActivityDetail, ActivityRecord, DaySegment, SegmentSet, MS_PER_HOUR};

/// Split one record into chronological, day-aligned segments.
///
/// Returns an empty vector for negative or non-finite durations, and for a
/// record whose end falls outside the representable calendar. A zero
/// duration yields exactly one zero-length segment.
pub fn split_record(record: &ActivityRecord) -> Vec<DaySegment> {
    if !record.duration_ms.is_finite() || record.duration_ms < 0.0 {
        tracing::debug!(
            category = %record.category,
            start = %record.start,
            duration_ms = record.duration_ms,
            "Dropping record with invalid duration"
        );
        return Vec::new();
    }

    let Some(end) = end_of(record) else {
        tracing::warn!(
            category = %record.category,
            start = %record.start,
            duration_ms = record.duration_ms,
            "Dropping record whose end is out of range"
        );
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut current = record.start;
    let mut remaining = record.duration_ms;

    while current.date() < end.date() {
        // end.date() > current.date() guarantees a following day exists
        let Some(next_day) = current.date().succ_opt() else {
            break;
        };
        let next_midnight = next_day.and_time(NaiveTime::MIN);
        let interval = millis_between(current, next_midnight);

        segments.push(segment(record, current, next_midnight, interval / MS_PER_HOUR));
        remaining -= interval;
        current = next_midnight;
    }

    if current == end && !segments.is_empty() {
        // Record ended exactly on a midnight: no trailing empty segment. Fold
        // any sub-microsecond rounding residue into the last real one.
        if let Some(last) = segments.last_mut() {
            last.duration_hours = (last.duration_hours + remaining / MS_PER_HOUR).max(0.0);
        }
    } else {
        segments.push(segment(record, current, end, (remaining / MS_PER_HOUR).max(0.0)));
    }

    segments
}

/// Split a whole load, preserving record order.
pub fn split_records(records: &[ActivityRecord], detail: ActivityDetail) -> SegmentSet {
    let mut segments = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        let parts = split_record(record);
        if parts.is_empty() {
            dropped += 1;
        }
        segments.extend(parts);
    }

    tracing::debug!(
        records = records.len(),
        segments = segments.len(),
        dropped,
        "Split records into day segments"
    );

    SegmentSet { segments, detail }
}

fn end_of(record: &ActivityRecord) -> Option<NaiveDateTime> {
    let micros = (record.duration_ms * 1000.0).round();
    if micros >= i64::MAX as f64 {
        return None;
    }
    record
        .start
        .checked_add_signed(Duration::microseconds(micros as i64))
}

fn millis_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to - from;
    delta
        .num_microseconds()
        .map(|us| us as f64 / 1000.0)
        .unwrap_or_else(|| delta.num_milliseconds() as f64)
}

fn segment(
    record: &ActivityRecord,
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration_hours: f64,
) -> DaySegment {
    DaySegment {
        date: start.date(),
        category: record.category.clone(),
        name: record.name.clone(),
        note: record.note.clone(),
        start,
        end,
        duration_hours,
    }
}
