//! Duration-ranked category ordering.
//!
//! The catalog is computed once per load from every segment, regardless of
//! which period is being viewed, so that stacking order, legend order and
//! summary order agree across all views.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::DaySegment;

/// Total hours logged against one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub hours: f64,
}

/// Categories ranked by descending total hours, ties alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryCatalog {
    ranked: Vec<CategoryTotal>,
}

impl CategoryCatalog {
    /// Rank every category present in `segments`.
    pub fn from_segments(segments: &[DaySegment]) -> Self {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for segment in segments {
            *totals.entry(segment.category.as_str()).or_insert(0.0) += segment.duration_hours;
        }

        let mut ranked: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, hours)| CategoryTotal {
                category: category.to_string(),
                hours,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.hours
                .total_cmp(&a.hours)
                .then_with(|| a.category.cmp(&b.category))
        });

        tracing::debug!(categories = ranked.len(), "Built category catalog");

        Self { ranked }
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Category names in catalog order.
    pub fn order(&self) -> Vec<&str> {
        self.ranked.iter().map(|t| t.category.as_str()).collect()
    }

    /// Catalog order with `hidden` left out; the rest keep their relative order.
    pub fn active(&self, hidden: Option<&str>) -> Vec<&str> {
        self.ranked
            .iter()
            .map(|t| t.category.as_str())
            .filter(|c| Some(*c) != hidden)
            .collect()
    }

    /// Stable index of `category`, e.g. for palette lookup.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.ranked.iter().position(|t| t.category == category)
    }

    /// Per-category totals across the whole load, in catalog order.
    pub fn totals(&self) -> &[CategoryTotal] {
        &self.ranked
    }
}
