//! Content hashes for external memoization.
//!
//! Nothing here caches. These keys let a caching layer recognise that a
//! record set (and the navigation/toggle state applied to it) is unchanged.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::period::PeriodKind;
use crate::types::ActivityRecord;

/// SHA-256 hex digest over the records' canonical JSON form, in order.
pub fn dataset_fingerprint(records: &[ActivityRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        // Debug output as a fallback; a record is never skipped.
        match serde_json::to_vec(record) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(format!("{record:?}").as_bytes()),
        }
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// Key for one rendered view: dataset plus period, anchor, and hidden category.
pub fn view_key(
    dataset: &str,
    kind: PeriodKind,
    anchor: NaiveDate,
    hidden: Option<&str>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dataset.as_bytes());
    hasher.update(kind.as_str().as_bytes());
    hasher.update(anchor.format("%Y-%m-%d").to_string().as_bytes());
    if let Some(hidden) = hidden {
        hasher.update(b"\x00hidden=");
        hasher.update(hidden.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, duration_ms: f64) -> ActivityRecord {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ActivityRecord::new(category, start, duration_ms)
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let records = vec![record("Work", 1000.0), record("Sleep", 2000.0)];
        let a = dataset_fingerprint(&records);
        let b = dataset_fingerprint(&records.clone());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_sees_changes() {
        let base = dataset_fingerprint(&[record("Work", 1000.0)]);
        assert_ne!(base, dataset_fingerprint(&[record("Work", 1001.0)]));
        assert_ne!(base, dataset_fingerprint(&[record("Play", 1000.0)]));
        assert_ne!(base, dataset_fingerprint(&[record("Work", 1000.0).with_note("x")]));
        assert_ne!(base, dataset_fingerprint(&[]));
    }

    #[test]
    fn test_view_key_varies_with_state() {
        let data = dataset_fingerprint(&[record("Work", 1000.0)]);
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let base = view_key(&data, PeriodKind::Week, day, None);
        assert_eq!(base, view_key(&data, PeriodKind::Week, day, None));
        assert_ne!(base, view_key(&data, PeriodKind::Month, day, None));
        assert_ne!(base, view_key(&data, PeriodKind::Week, day.succ_opt().unwrap(), None));
        assert_ne!(base, view_key(&data, PeriodKind::Week, day, Some("Sleep")));
    }
}
