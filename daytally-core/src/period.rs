//! Calendar windows and the shift-by-one-period rule.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Navigation granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    Year,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 4] = [
        PeriodKind::Day,
        PeriodKind::Week,
        PeriodKind::Month,
        PeriodKind::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Day => "day",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Year => "year",
        }
    }

    /// Inclusive calendar window of this kind containing `anchor`.
    ///
    /// Month and year windows never leave the anchor's year, so they exist
    /// for every representable anchor. A week window touching the first or
    /// last representable date is cut short at that date.
    pub fn window(&self, anchor: NaiveDate) -> PeriodWindow {
        match self {
            PeriodKind::Day => PeriodWindow::single(anchor),
            PeriodKind::Week => {
                let offset = anchor.weekday().num_days_from_monday() as i64;
                let start = anchor
                    .checked_sub_signed(Duration::days(offset))
                    .unwrap_or(NaiveDate::MIN);
                let end = anchor
                    .checked_add_signed(Duration::days(6 - offset))
                    .unwrap_or(NaiveDate::MAX);
                PeriodWindow::new(start, end)
            }
            PeriodKind::Month => PeriodWindow::new(
                anchor.with_day(1).unwrap_or(anchor),
                last_of_month(anchor.year(), anchor.month()).unwrap_or(anchor),
            ),
            PeriodKind::Year => PeriodWindow::new(
                anchor.with_ordinal(1).unwrap_or(anchor),
                NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap_or(anchor),
            ),
        }
    }

    /// Move `anchor` one period in `direction`.
    ///
    /// Month shifts clamp the day to 28 so every month can hold it. Year
    /// shifts keep month and day, except Feb 29 lands on Feb 28.
    pub fn shift(&self, anchor: NaiveDate, direction: Direction) -> Result<NaiveDate> {
        self.advance(anchor, direction.step())
    }

    /// Move `anchor` by `steps` periods (negative moves back).
    ///
    /// Same result as `steps` single shifts, computed in one go. Fails with
    /// [`Error::InvalidDate`] when the target is outside the representable
    /// calendar; nothing wraps or saturates.
    pub fn advance(&self, anchor: NaiveDate, steps: i64) -> Result<NaiveDate> {
        if steps == 0 {
            return Ok(anchor);
        }
        let target = match self {
            PeriodKind::Day => add_days(anchor, Some(steps)),
            PeriodKind::Week => add_days(anchor, steps.checked_mul(7)),
            PeriodKind::Month => {
                let months = i64::from(anchor.year()) * 12 + i64::from(anchor.month0());
                months.checked_add(steps).and_then(|months| {
                    let year = i32::try_from(months.div_euclid(12)).ok()?;
                    let month = months.rem_euclid(12) as u32 + 1;
                    NaiveDate::from_ymd_opt(year, month, anchor.day().min(28))
                })
            }
            PeriodKind::Year => {
                // The first single step from Feb 29 always lands in a common year.
                let day = if (anchor.month(), anchor.day()) == (2, 29) {
                    28
                } else {
                    anchor.day()
                };
                i64::from(anchor.year())
                    .checked_add(steps)
                    .and_then(|year| i32::try_from(year).ok())
                    .and_then(|year| NaiveDate::from_ymd_opt(year, anchor.month(), day))
            }
        };

        target.ok_or_else(|| {
            Error::InvalidDate(format!(
                "moving {} by {} {}(s) leaves the supported calendar",
                anchor.format("%Y-%m-%d"),
                steps,
                self
            ))
        })
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(PeriodKind::Day),
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "year" => Ok(PeriodKind::Year),
            _ => Err(Error::InvalidPeriod(s.to_string())),
        }
    }
}

/// Which way to move a navigation anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    pub fn step(&self) -> i64 {
        match self {
            Direction::Back => -1,
            Direction::Forward => 1,
        }
    }

    /// Direction for a non-zero signed step; `None` for zero.
    pub fn from_step(step: i64) -> Option<Self> {
        match step.signum() {
            -1 => Some(Direction::Back),
            1 => Some(Direction::Forward),
            _ => None,
        }
    }
}

/// Inclusive date range `[start_date, end_date]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodWindow {
    /// Build a window; the bounds are swapped if given out of order.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        if start_date <= end_date {
            Self { start_date, end_date }
        } else {
            Self {
                start_date: end_date,
                end_date: start_date,
            }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of days in the window, both ends counted.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn spans_multiple_days(&self) -> bool {
        self.start_date != self.end_date
    }

    /// Every date in the window, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// Display label for a window of the given kind.
    pub fn label(&self, kind: PeriodKind) -> String {
        match kind {
            PeriodKind::Day => self.start_date.format("%Y-%m-%d").to_string(),
            PeriodKind::Week => format!("Week of {}", self.start_date.format("%Y-%m-%d")),
            PeriodKind::Month => self.start_date.format("%B %Y").to_string(),
            PeriodKind::Year => self.start_date.year().to_string(),
        }
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("{s}: {e}")))
}

fn add_days(anchor: NaiveDate, days: Option<i64>) -> Option<NaiveDate> {
    anchor.checked_add_signed(Duration::try_days(days?)?)
}

fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    (28..=31)
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
}
