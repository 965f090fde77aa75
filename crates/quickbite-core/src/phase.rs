use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;

/// First instant of the crisis window. Anything strictly before it is Pre-Crisis.
pub static CRISIS_CUTOFF: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
});

/// Month key of the cutoff. The month path compares "YYYY-MM" strings against
/// this truncated form, never against the full date string, so both
/// classification paths agree at every month boundary.
pub const CRISIS_CUTOFF_MONTH: &str = "2025-06";

pub const MONTH_FORMAT: &str = "%Y-%m";

pub const PHASE_COL: &str = "phase";
pub const MONTH_COL: &str = "month_year";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    PreCrisis,
    Crisis,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::PreCrisis => "Pre-Crisis",
            Phase::Crisis => "Crisis",
        }
    }

    /// Timestamp path: strict `<` against the cutoff instant, so the cutoff
    /// itself classifies as Crisis. Total over any timestamp.
    pub fn of_datetime(ts: NaiveDateTime) -> Self {
        if ts < *CRISIS_CUTOFF {
            Phase::PreCrisis
        } else {
            Phase::Crisis
        }
    }

    /// Month-string path kept from the dashboard: lexical compare on "YYYY-MM"
    /// (which is chronological for zero-padded months).
    pub fn of_month(month: &str) -> Self {
        if month < CRISIS_CUTOFF_MONTH {
            Phase::PreCrisis
        } else {
            Phase::Crisis
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a datetime column into the phase label column.
pub fn phase_of_timestamp_expr(timestamp_col: &str) -> Expr {
    when(col(timestamp_col).lt(lit(*CRISIS_CUTOFF)))
        .then(lit(Phase::PreCrisis.as_str()))
        .otherwise(lit(Phase::Crisis.as_str()))
        .alias(PHASE_COL)
}

/// Truncate a datetime column to its "YYYY-MM" key.
pub fn month_of_timestamp_expr(timestamp_col: &str) -> Expr {
    col(timestamp_col).dt().strftime(MONTH_FORMAT).alias(MONTH_COL)
}

/// Classify the month key column into the phase label column.
pub fn phase_of_month_expr() -> Expr {
    when(col(MONTH_COL).lt(lit(CRISIS_CUTOFF_MONTH)))
        .then(lit(Phase::PreCrisis.as_str()))
        .otherwise(lit(Phase::Crisis.as_str()))
        .alias(PHASE_COL)
}
