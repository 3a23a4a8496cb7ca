//! Integration tests for the daytally kernel
//!
//! These tests drive the public API end to end: records are split, ranked,
//! sliced by navigation windows and summarized.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use daytally_core::analytics::{CategoryCatalog, DailyMatrix, PeriodView, ViewOptions, WindowSlice};
use daytally_core::{
    split_record, split_records, ActivityDetail, ActivityRecord, Direction, NavigationState,
    PeriodKind, SegmentSet, MS_PER_HOUR,
};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn week_of_records() -> Vec<ActivityRecord> {
    vec![
        ActivityRecord::new("Sleep", at("2024-01-01T23:00"), 8.0 * MS_PER_HOUR),
        ActivityRecord::new("Work", at("2024-01-02T09:00"), 3.0 * MS_PER_HOUR)
            .with_name("Coding")
            .with_note("splitter"),
        ActivityRecord::new("Work", at("2024-01-02T13:00"), 1.0 * MS_PER_HOUR)
            .with_name("Meetings"),
        ActivityRecord::new("Sleep", at("2024-01-02T22:30"), 7.5 * MS_PER_HOUR),
        ActivityRecord::new("Exercise", at("2024-01-03T18:00"), 1.0 * MS_PER_HOUR)
            .with_name("Run")
            .with_note("5k"),
        ActivityRecord::new("Work", at("2024-01-03T09:00"), 4.0 * MS_PER_HOUR)
            .with_name("Coding")
            .with_note("tests"),
    ]
}

// ============================================
// Splitting properties
// ============================================

#[test]
fn test_split_conserves_duration_for_every_record() {
    for record in week_of_records() {
        let segments = split_record(&record);
        let total: f64 = segments.iter().map(|s| s.duration_hours).sum();
        assert!((total - record.duration_ms / MS_PER_HOUR).abs() < 1e-9);
    }
}

#[test]
fn test_midnight_scenario() {
    let record = ActivityRecord::new("Sleep", at("2024-01-01T23:00"), 7_200_000.0);
    let segments = split_record(&record);
    assert_eq!(segments.len(), 2);
    assert_eq!(
        (segments[0].start, segments[0].end, segments[0].date),
        (at("2024-01-01T23:00"), at("2024-01-02T00:00"), d("2024-01-01"))
    );
    assert_eq!(
        (segments[1].start, segments[1].end, segments[1].date),
        (at("2024-01-02T00:00"), at("2024-01-02T01:00"), d("2024-01-02"))
    );
    assert!((segments[0].duration_hours - 1.0).abs() < 1e-9);
    assert!((segments[1].duration_hours - 1.0).abs() < 1e-9);
}

// ============================================
// Period properties
// ============================================

#[test]
fn test_week_start_is_monday_for_a_year_of_dates() {
    for date in PeriodKind::Year.window(d("2024-06-01")).dates() {
        let window = PeriodKind::Week.window(date);
        assert_eq!(window.start_date.weekday(), Weekday::Mon);
        assert!(window.contains(date));
    }
}

#[test]
fn test_month_end_across_leap_and_common_years() {
    for year in [2023, 2024] {
        for month in 1..=12 {
            let anchor = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let window = PeriodKind::Month.window(anchor);
            let next = window.end_date.succ_opt().unwrap();
            assert_eq!(next.day(), 1, "{year}-{month}");
            assert_eq!(window.end_date.month(), month);
        }
    }
    assert_eq!(PeriodKind::Month.window(d("2024-02-01")).end_date.day(), 29);
    assert_eq!(PeriodKind::Month.window(d("2023-02-01")).end_date.day(), 28);
}

#[test]
fn test_month_shift_round_trip_keeps_day_class() {
    for anchor in PeriodKind::Year.window(d("2024-01-01")).dates() {
        let back = PeriodKind::Month.shift(anchor, Direction::Back).unwrap();
        let forth = PeriodKind::Month.shift(back, Direction::Forward).unwrap();
        assert_eq!((forth.year(), forth.month()), (anchor.year(), anchor.month()));
        assert_eq!(forth.day(), anchor.day().min(28));
    }
}

// ============================================
// Aggregation and summary
// ============================================

#[test]
fn test_full_pipeline_week_view() {
    let records = week_of_records();
    let set = split_records(&records, ActivityDetail::Available);
    let catalog = CategoryCatalog::from_segments(&set.segments);
    assert_eq!(catalog.order(), vec!["Sleep", "Work", "Exercise"]);

    let nav = NavigationState::for_segments(&set, d("2030-01-01"));
    assert_eq!(nav.anchor(PeriodKind::Week), d("2024-01-03"));

    let view = PeriodView::compute(&set, &catalog, &nav, PeriodKind::Week, &ViewOptions::default());
    assert_eq!(view.label, "Week of 2024-01-01");
    assert_eq!(
        view.summary,
        "63% 15:30h Sleep\n\
         \x20 63% 15:30h (unnamed)\n\
         33% 08:00h Work\n\
         \x20 29% 07:00h Coding: splitter, tests\n\
         \x20 4% 01:00h Meetings\n\
         4% 01:00h Exercise\n\
         \x20 4% 01:00h Run: 5k"
    );

    let matrix = view.chart_matrix(&catalog);
    assert_eq!(matrix.dates(), vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")]);
    assert_eq!(matrix.get(d("2024-01-02"), "Sleep"), Some(8.5));
    assert_eq!(matrix.get(d("2024-01-03"), "Sleep"), Some(6.0));
}

#[test]
fn test_summary_scenario_sixty_forty() {
    let records = vec![
        ActivityRecord::new("B", at("2024-03-04T08:00"), 4.0 * MS_PER_HOUR),
        ActivityRecord::new("A", at("2024-03-04T12:00"), 6.0 * MS_PER_HOUR),
    ];
    let set = split_records(&records, ActivityDetail::Unavailable);
    let catalog = CategoryCatalog::from_segments(&set.segments);
    let nav = NavigationState::for_segments(&set, d("2030-01-01"));
    let view = PeriodView::compute(&set, &catalog, &nav, PeriodKind::Day, &ViewOptions::default());

    let lines: Vec<_> = view.summary.lines().collect();
    let a = lines.iter().position(|l| *l == "60% 06:00h A").unwrap();
    let b = lines.iter().position(|l| *l == "40% 04:00h B").unwrap();
    assert!(a < b);
}

#[test]
fn test_daily_matrix_deterministic_bitwise() {
    let set = split_records(&week_of_records(), ActivityDetail::Available);
    let catalog = CategoryCatalog::from_segments(&set.segments);
    let first = DailyMatrix::from_segments(&set.segments, &catalog);
    let second = DailyMatrix::from_segments(&set.segments, &catalog);
    assert_eq!(first, second);
    let bits = |m: &DailyMatrix| -> Vec<u64> {
        m.rows
            .iter()
            .flat_map(|r| r.hours.iter().map(|h| h.to_bits()))
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_empty_input_everywhere() {
    let set = split_records(&[], ActivityDetail::Unavailable);
    assert_eq!(set, SegmentSet::default());

    let catalog = CategoryCatalog::from_segments(&set.segments);
    assert!(catalog.is_empty());
    assert!(DailyMatrix::from_segments(&set.segments, &catalog).is_empty());

    let nav = NavigationState::for_segments(&set, d("2026-10-19"));
    for kind in PeriodKind::ALL {
        let slice = WindowSlice::new(&set.segments, nav.window(kind), &catalog);
        assert!(slice.is_empty());
        let view = PeriodView::compute(&set, &catalog, &nav, kind, &ViewOptions::default());
        assert_eq!(view.summary, "");
    }
}
