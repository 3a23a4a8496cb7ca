//! One render pass over the current navigation state.
//!
//! A [`PeriodView`] is rebuilt from scratch every time it is requested, from
//! the segment set, the catalog, and the anchor the cursor holds right now.
//! Nothing is kept between passes.

use serde::Serialize;

use super::aggregate::{DailyMatrix, WindowSlice};
use super::catalog::CategoryCatalog;
use super::summary::SummaryFormatter;
use crate::navigation::NavigationState;
use crate::period::{PeriodKind, PeriodWindow};
use crate::types::SegmentSet;

/// Display options that vary per session but not per load.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Category left out of display (totals still include it)
    pub hidden_category: Option<String>,
    pub summary: SummaryFormatter,
}

/// Everything the rendering layer needs for one period.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodView {
    pub kind: PeriodKind,
    pub label: String,
    pub window: PeriodWindow,
    /// Categories to draw, in catalog order, hidden one removed
    pub legend: Vec<String>,
    pub slice: WindowSlice,
    pub summary: String,
}

impl PeriodView {
    pub fn compute(
        set: &SegmentSet,
        catalog: &CategoryCatalog,
        nav: &NavigationState,
        kind: PeriodKind,
        options: &ViewOptions,
    ) -> Self {
        let hidden = options.hidden_category.as_deref();
        let window = nav.window(kind);
        let slice = WindowSlice::new(&set.segments, window, catalog);
        let summary = options.summary.format(&slice, catalog, set.detail, hidden);
        let legend = catalog.active(hidden).into_iter().map(String::from).collect();

        tracing::debug!(
            period = %kind,
            window = %window,
            segments = slice.segments.len(),
            "Computed period view"
        );

        Self {
            kind,
            label: window.label(kind),
            window,
            legend,
            slice,
            summary,
        }
    }

    /// Day-by-day matrix for charting. Windows of a single day get a
    /// one-row matrix built from the slice.
    pub fn chart_matrix(&self, catalog: &CategoryCatalog) -> DailyMatrix {
        match &self.slice.daily {
            Some(matrix) => matrix.clone(),
            None => DailyMatrix::from_segments(&self.slice.segments, catalog),
        }
    }
}
