//! Analytics over day segments
//!
//! Provides the views a dashboard renders:
//! - Category catalog (the one ordering every view shares)
//! - Daily date × category matrix and per-window slices
//! - Plain-text period summary
//! - Per-render period view tying the above to the navigation cursor
//!
//! Everything here is a pure function of its inputs, so results can be
//! memoized externally on [`crate::fingerprint`] keys.

pub mod aggregate;
pub mod catalog;
pub mod summary;
pub mod view;

pub use aggregate::{round_hours, DailyMatrix, MatrixRow, WindowSlice, MATRIX_PRECISION};
pub use catalog::{CategoryCatalog, CategoryTotal};
pub use summary::{SummaryFormatter, UNNAMED_ACTIVITY};
pub use view::{PeriodView, ViewOptions};
