//! Formatting helpers shared by the summary and the CLI.

/// Format hours as `HH:MM` (floor hours, nearest minute).
///
/// A minute value that rounds up to 60 carries into the hour, so 1.9999h
/// is `02:00` rather than `01:60`.
pub fn format_hhmm(hours: f64) -> String {
    let hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
    let mut whole = hours.floor() as i64;
    let mut minutes = ((hours - hours.floor()) * 60.0).round() as i64;
    if minutes == 60 {
        whole += 1;
        minutes = 0;
    }
    format!("{:02}:{:02}", whole, minutes)
}

/// Whole-number percentage of `part` in `total`; 0 when `total` is 0.
pub fn percent(part: f64, total: f64) -> i64 {
    if total <= 0.0 || !total.is_finite() {
        0
    } else {
        (100.0 * part / total).round() as i64
    }
}

/// Format hours as a short total (e.g. "312h 45m").
pub fn format_hours_short(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;
    if h > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}m", m)
    }
}
