//! CSV loader for activity exports.
//!
//! Expected columns (by header name):
//! - `activityCategoryName` (required)
//! - `activityStartDate` (required)
//! - `activityDuration` in milliseconds (required)
//! - `activityName` (optional; its presence enables per-activity breakdowns)
//! - `note` (optional)
//!
//! Rows that cannot become a valid record are skipped and counted; they never
//! reach the kernel.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use csv::StringRecord;
use daytally_core::{ActivityDetail, ActivityRecord};

pub const CATEGORY_COLUMN: &str = "activityCategoryName";
pub const START_COLUMN: &str = "activityStartDate";
pub const DURATION_COLUMN: &str = "activityDuration";
pub const NAME_COLUMN: &str = "activityName";
pub const NOTE_COLUMN: &str = "note";

/// Records read from one file.
#[derive(Debug)]
pub struct LoadedRecords {
    pub records: Vec<ActivityRecord>,
    pub detail: ActivityDetail,
    /// Rows dropped for a blank category, bad timestamp or bad duration
    pub skipped: usize,
}

struct Columns {
    category: usize,
    start: usize,
    duration: usize,
    name: Option<usize>,
    note: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            find(name).with_context(|| format!("CSV is missing required column '{}'", name))
        };
        Ok(Self {
            category: required(CATEGORY_COLUMN)?,
            start: required(START_COLUMN)?,
            duration: required(DURATION_COLUMN)?,
            name: find(NAME_COLUMN),
            note: find(NOTE_COLUMN),
        })
    }
}

/// Load an activity export from disk.
pub fn load_csv(path: &Path) -> Result<LoadedRecords> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let loaded =
        read_records(file).with_context(|| format!("failed to read {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped,
        detail = ?loaded.detail,
        "Loaded activity export"
    );
    Ok(loaded)
}

/// Parse an activity export from any reader.
pub fn read_records<R: Read>(reader: R) -> Result<LoadedRecords> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("malformed CSV at data row {}", index + 1))?;
        let fields = repair_fields(&row, headers.len());
        match parse_row(&fields, &columns) {
            Some(record) => records.push(record),
            None => {
                tracing::debug!(row = index + 1, "Skipping unusable row");
                skipped += 1;
            }
        }
    }

    let detail = if columns.name.is_some() {
        ActivityDetail::Available
    } else {
        ActivityDetail::Unavailable
    };

    Ok(LoadedRecords {
        records,
        detail,
        skipped,
    })
}

/// Fold fields beyond the header's width back into the last column.
///
/// Exports write notes unquoted, so a comma inside a note splits it into
/// extra fields.
pub fn repair_fields(row: &StringRecord, width: usize) -> Vec<String> {
    if width == 0 || row.len() <= width {
        return row.iter().map(String::from).collect();
    }
    let mut fields: Vec<String> = row.iter().take(width - 1).map(String::from).collect();
    let tail: Vec<&str> = row.iter().skip(width - 1).collect();
    fields.push(tail.join(","));
    fields
}

fn parse_row(fields: &[String], columns: &Columns) -> Option<ActivityRecord> {
    let field = |i: usize| fields.get(i).map(|s| s.trim()).filter(|s| !s.is_empty());

    let category = field(columns.category)?;
    let start = parse_timestamp(field(columns.start)?)?;
    let duration_ms: f64 = field(columns.duration)?.parse().ok()?;

    Some(ActivityRecord {
        category: category.to_string(),
        name: columns.name.and_then(field).map(String::from),
        start,
        duration_ms,
        note: columns.note.and_then(field).map(String::from),
    })
}

/// Parse a timestamp as local wall-clock time, discarding any offset.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    const WITH_OFFSET: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f %z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f %:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
    ];
    const NAIVE: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in WITH_OFFSET {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = ts("2024-01-01 23:00:00");
        assert_eq!(parse_timestamp("2024-01-01 23:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T23:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 23:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 23:00:00 +0100"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T23:00:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T23:00:00Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-01 23:00:00.250"),
            Some(expected + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_read_records_with_detail() {
        let csv = "\
activityCategoryName,activityName,activityStartDate,activityDuration,note
Work,Coding,2024-01-02 09:00:00 +0100,3600000,parser
Sleep,,2024-01-01 23:00:00 +0100,7200000,
";
        let loaded = read_records(csv.as_bytes()).unwrap();
        assert_eq!(loaded.detail, ActivityDetail::Available);
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records.len(), 2);

        let work = &loaded.records[0];
        assert_eq!(work.category, "Work");
        assert_eq!(work.name.as_deref(), Some("Coding"));
        assert_eq!(work.start, ts("2024-01-02 09:00:00"));
        assert_eq!(work.duration_ms, 3_600_000.0);
        assert_eq!(work.note.as_deref(), Some("parser"));

        let sleep = &loaded.records[1];
        assert!(sleep.name.is_none());
        assert!(sleep.note.is_none());
    }

    #[test]
    fn test_read_records_without_name_column() {
        let csv = "activityCategoryName,activityStartDate,activityDuration\nWork,2024-01-02 09:00:00,60000\n";
        let loaded = read_records(csv.as_bytes()).unwrap();
        assert_eq!(loaded.detail, ActivityDetail::Unavailable);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "\
activityCategoryName,activityStartDate,activityDuration
Work,2024-01-02 09:00:00,60000
,2024-01-02 09:00:00,60000
Work,not a date,60000
Work,2024-01-02 09:00:00,sixty
Work,2024-01-02 09:00:00
";
        let loaded = read_records(csv.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.skipped, 4);
    }

    #[test]
    fn test_commas_in_notes_are_repaired() {
        let csv = "\
activityCategoryName,activityStartDate,activityDuration,note
Work,2024-01-02 09:00:00,60000,first, second, third
";
        let loaded = read_records(csv.as_bytes()).unwrap();
        assert_eq!(
            loaded.records[0].note.as_deref(),
            Some("first, second, third")
        );
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "activityCategoryName,activityDuration\nWork,60000\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("activityStartDate"));
    }
}
