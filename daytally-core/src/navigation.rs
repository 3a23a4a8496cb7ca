//! Per-period navigation cursor.
//!
//! Each [`PeriodKind`] keeps its own anchor date. A kind that has never been
//! shifted reads as the default anchor (the latest date in the data, or
//! today when there is no data). The state is a plain value: callers own it
//! and thread it through render passes, and separate sessions never share one.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::period::{Direction, PeriodKind, PeriodWindow};
use crate::types::SegmentSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    default_anchor: NaiveDate,
    anchors: BTreeMap<PeriodKind, NaiveDate>,
}

impl NavigationState {
    /// Every kind starts uninitialized and reads as `default_anchor`.
    pub fn new(default_anchor: NaiveDate) -> Self {
        Self {
            default_anchor,
            anchors: BTreeMap::new(),
        }
    }

    /// Default to the latest segment date, or `today` for an empty set.
    pub fn for_segments(set: &SegmentSet, today: NaiveDate) -> Self {
        Self::new(set.max_date().unwrap_or(today))
    }

    pub fn default_anchor(&self) -> NaiveDate {
        self.default_anchor
    }

    /// Current anchor for `kind`.
    pub fn anchor(&self, kind: PeriodKind) -> NaiveDate {
        self.anchors
            .get(&kind)
            .copied()
            .unwrap_or(self.default_anchor)
    }

    /// Whether `kind` has been moved away from the default.
    pub fn is_initialized(&self, kind: PeriodKind) -> bool {
        self.anchors.contains_key(&kind)
    }

    /// Window for `kind`, computed fresh from the current anchor.
    pub fn window(&self, kind: PeriodKind) -> PeriodWindow {
        kind.window(self.anchor(kind))
    }

    /// Move `kind` one period. Other kinds are untouched.
    ///
    /// On error (the target is off the calendar) the state is unchanged.
    pub fn shift(&mut self, kind: PeriodKind, direction: Direction) -> Result<()> {
        self.shift_by(kind, direction.step())
    }

    pub fn shift_left(&mut self, kind: PeriodKind) -> Result<()> {
        self.shift(kind, Direction::Back)
    }

    pub fn shift_right(&mut self, kind: PeriodKind) -> Result<()> {
        self.shift(kind, Direction::Forward)
    }

    /// Apply a signed number of shifts (negative moves back).
    pub fn shift_by(&mut self, kind: PeriodKind, steps: i64) -> Result<()> {
        if steps == 0 {
            return Ok(());
        }
        let from = self.anchor(kind);
        let to = kind.advance(from, steps)?;
        tracing::debug!(period = %kind, steps, %from, %to, "Shifted navigation anchor");
        self.anchors.insert(kind, to);
        Ok(())
    }

    /// Pure form of [`shift`](Self::shift).
    pub fn shifted(&self, kind: PeriodKind, direction: Direction) -> Result<Self> {
        let mut next = self.clone();
        next.shift(kind, direction)?;
        Ok(next)
    }

    /// Set the anchor for `kind` directly.
    pub fn jump_to(&mut self, kind: PeriodKind, date: NaiveDate) {
        self.anchors.insert(kind, date);
    }

    /// Return `kind` to the uninitialized state.
    pub fn reset(&mut self, kind: PeriodKind) {
        self.anchors.remove(&kind);
    }
}
