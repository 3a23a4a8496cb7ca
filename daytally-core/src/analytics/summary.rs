//! Plain-text percentage / duration summary for one period.
//!
//! Output looks like:
//!
//! ```text
//! 60% 06:00h Work
//!   40% 04:00h Coding: daytally, review
//!   20% 02:00h Email
//! 40% 04:00h Sleep
//!   40% 04:00h (unnamed)
//! ```
//!
//! Categories follow catalog order. The text is meant to be shown verbatim,
//! so the exact layout is part of the contract.

use std::collections::BTreeMap;

use super::aggregate::WindowSlice;
use super::catalog::CategoryCatalog;
use crate::format::{format_hhmm, percent};
use crate::types::{ActivityDetail, DaySegment};

/// Label used for segments with no activity name.
pub const UNNAMED_ACTIVITY: &str = "(unnamed)";

const INDENT: &str = "  ";

/// Renders a [`WindowSlice`] as a nested text block.
#[derive(Debug, Clone)]
pub struct SummaryFormatter {
    /// Distinct notes listed per activity before collapsing to "(+N more)"
    pub max_notes: usize,
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self { max_notes: 3 }
    }
}

#[derive(Default)]
struct ActivityTotal<'a> {
    hours: f64,
    notes: Vec<&'a str>,
}

impl SummaryFormatter {
    pub fn new(max_notes: usize) -> Self {
        Self { max_notes }
    }

    /// Format `slice`, listing categories in `catalog` order minus `hidden`.
    ///
    /// Percentages are taken against the whole slice, hidden category
    /// included. Returns an empty string for an empty slice.
    pub fn format(
        &self,
        slice: &WindowSlice,
        catalog: &CategoryCatalog,
        detail: ActivityDetail,
        hidden: Option<&str>,
    ) -> String {
        let total = slice.total_hours;
        let mut lines = Vec::new();

        for category in catalog.active(hidden) {
            let Some(hours) = slice.category_hours(category) else {
                continue;
            };
            lines.push(line(hours, total, category));

            if detail.is_available() {
                for (name, activity) in self.activities(slice, category) {
                    let mut sub = format!("{INDENT}{}", line(activity.hours, total, name));
                    if let Some(notes) = self.notes_suffix(&activity.notes) {
                        sub.push_str(": ");
                        sub.push_str(&notes);
                    }
                    lines.push(sub);
                }
            } else {
                for segment in slice.category_segments(category) {
                    lines.push(format!("{INDENT}{}h", format_hhmm(segment.duration_hours)));
                }
            }
        }

        lines.join("\n")
    }

    /// Activities of one category, largest first, ties by name.
    fn activities<'a>(
        &self,
        slice: &'a WindowSlice,
        category: &'a str,
    ) -> Vec<(&'a str, ActivityTotal<'a>)> {
        let mut grouped: BTreeMap<&str, ActivityTotal> = BTreeMap::new();
        for segment in slice.category_segments(category) {
            let entry = grouped.entry(activity_name(segment)).or_default();
            entry.hours += segment.duration_hours;
            if let Some(note) = segment.note.as_deref().map(str::trim) {
                if !note.is_empty() && !entry.notes.contains(&note) {
                    entry.notes.push(note);
                }
            }
        }

        let mut activities: Vec<_> = grouped.into_iter().collect();
        activities.sort_by(|(a_name, a), (b_name, b)| {
            b.hours.total_cmp(&a.hours).then_with(|| a_name.cmp(b_name))
        });
        activities
    }

    fn notes_suffix(&self, notes: &[&str]) -> Option<String> {
        if notes.is_empty() || self.max_notes == 0 {
            return None;
        }
        let shown = notes.len().min(self.max_notes);
        let mut text = notes[..shown].join(", ");
        if notes.len() > shown {
            text.push_str(&format!(" (+{} more)", notes.len() - shown));
        }
        Some(text)
    }
}

fn activity_name(segment: &DaySegment) -> &str {
    match segment.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => UNNAMED_ACTIVITY,
    }
}

fn line(hours: f64, total: f64, label: &str) -> String {
    format!("{}% {}h {}", percent(hours, total), format_hhmm(hours), label)
}
