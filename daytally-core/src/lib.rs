//! # daytally-core
//!
//! Core library for daytally - the computational kernel behind an
//! activity-log dashboard.
//!
//! This library provides:
//! - Domain types for activity records and day segments
//! - Midnight splitting of records into day-aligned segments
//! - Calendar windows and per-period navigation
//! - Category ranking, daily matrices, window slices and text summaries
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! - **Records:** produced by a loader, immutable
//! - **Segments:** records split at midnight, derived once per load
//! - **Catalog:** category ranking, derived once per load
//! - **Views:** window, slice, matrix and summary, rebuilt on every render
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use daytally_core::analytics::{CategoryCatalog, PeriodView, ViewOptions};
//! use daytally_core::{split_records, ActivityDetail, ActivityRecord, NavigationState, PeriodKind};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(23, 0, 0)
//!     .unwrap();
//! let records = vec![ActivityRecord::new("Sleep", start, 7_200_000.0)];
//!
//! let set = split_records(&records, ActivityDetail::Unavailable);
//! let catalog = CategoryCatalog::from_segments(&set.segments);
//! let mut nav = NavigationState::for_segments(&set, start.date());
//! nav.shift_left(PeriodKind::Day)?;
//!
//! let view = PeriodView::compute(&set, &catalog, &nav, PeriodKind::Day, &ViewOptions::default());
//! assert_eq!(view.summary, "100% 01:00h Sleep\n  01:00h");
//! # Ok::<(), daytally_core::Error>(())
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use navigation::NavigationState;
pub use period::{parse_date, Direction, PeriodKind, PeriodWindow};
pub use split::{split_record, split_records};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod logging;
pub mod navigation;
pub mod period;
pub mod split;
pub mod types;
