//! Grouping segments by date and category.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::catalog::{CategoryCatalog, CategoryTotal};
use crate::period::PeriodWindow;
use crate::types::DaySegment;

/// Decimal places matrix cells are rounded to.
pub const MATRIX_PRECISION: i32 = 9;

/// Round to [`MATRIX_PRECISION`] decimal places.
pub fn round_hours(hours: f64) -> f64 {
    let scale = 10f64.powi(MATRIX_PRECISION);
    (hours * scale).round() / scale
}

/// One date's hours, aligned with [`DailyMatrix::categories`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub date: NaiveDate,
    pub hours: Vec<f64>,
}

/// Dense date × category hour matrix.
///
/// Columns follow catalog order. Every date that has any segment gets a
/// row, and every row has a value for every column (zero when absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyMatrix {
    pub categories: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl DailyMatrix {
    pub fn from_segments(segments: &[DaySegment], catalog: &CategoryCatalog) -> Self {
        if segments.is_empty() {
            return Self::default();
        }

        let categories: Vec<String> = catalog.order().into_iter().map(String::from).collect();
        let column: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for segment in segments {
            let row = by_date
                .entry(segment.date)
                .or_insert_with(|| vec![0.0; categories.len()]);
            match column.get(segment.category.as_str()) {
                Some(&i) => row[i] += segment.duration_hours,
                None => tracing::trace!(
                    category = %segment.category,
                    "Segment category missing from catalog"
                ),
            }
        }

        let rows = by_date
            .into_iter()
            .map(|(date, hours)| MatrixRow {
                date,
                hours: hours.into_iter().map(round_hours).collect(),
            })
            .collect();

        Self { categories, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Hours for one cell; `None` if the date has no row or the category
    /// is not a column.
    pub fn get(&self, date: NaiveDate, category: &str) -> Option<f64> {
        let col = self.categories.iter().position(|c| c == category)?;
        self.rows
            .iter()
            .find(|r| r.date == date)
            .map(|r| r.hours[col])
    }

    /// Rows whose date lies inside `window`.
    pub fn restrict(&self, window: &PeriodWindow) -> Self {
        let rows: Vec<MatrixRow> = self
            .rows
            .iter()
            .filter(|r| window.contains(r.date))
            .cloned()
            .collect();
        if rows.is_empty() {
            return Self::default();
        }
        Self {
            categories: self.categories.clone(),
            rows,
        }
    }

    /// Column sums over every row, rounded like the cells.
    pub fn column_totals(&self) -> Vec<CategoryTotal> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, category)| CategoryTotal {
                category: category.clone(),
                hours: round_hours(self.rows.iter().map(|r| r.hours[i]).sum()),
            })
            .collect()
    }
}

/// Segments restricted to one [`PeriodWindow`], with per-category grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSlice {
    pub window: PeriodWindow,
    /// Segments whose date falls inside the window, in input order
    pub segments: Vec<DaySegment>,
    /// Totals for categories present in the window, in catalog order
    pub by_category: Vec<CategoryTotal>,
    /// Per-day breakdown, only for windows longer than one day
    pub daily: Option<DailyMatrix>,
    pub total_hours: f64,
}

impl WindowSlice {
    pub fn new(segments: &[DaySegment], window: PeriodWindow, catalog: &CategoryCatalog) -> Self {
        let segments: Vec<DaySegment> = segments
            .iter()
            .filter(|s| window.contains(s.date))
            .cloned()
            .collect();

        let mut totals: HashMap<&str, f64> = HashMap::new();
        for segment in &segments {
            *totals.entry(segment.category.as_str()).or_insert(0.0) += segment.duration_hours;
        }
        let by_category: Vec<CategoryTotal> = catalog
            .order()
            .into_iter()
            .filter_map(|category| {
                totals.get(category).map(|&hours| CategoryTotal {
                    category: category.to_string(),
                    hours,
                })
            })
            .collect();

        let total_hours = segments.iter().map(|s| s.duration_hours).sum();
        let daily = if window.spans_multiple_days() && !segments.is_empty() {
            Some(DailyMatrix::from_segments(&segments, catalog))
        } else {
            None
        };

        tracing::trace!(
            window = %window,
            segments = segments.len(),
            total_hours,
            "Built window slice"
        );

        Self {
            window,
            segments,
            by_category,
            daily,
            total_hours,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total for one category inside the window.
    pub fn category_hours(&self, category: &str) -> Option<f64> {
        self.by_category
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.hours)
    }

    /// Segments of one category, in input order.
    pub fn category_segments<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a DaySegment> + 'a {
        self.segments.iter().filter(move |s| s.category == category)
    }
}
