// ABOUTME: Validated inclusive date range used by every analytics request
// ABOUTME: Resolves missing bounds against an explicit "now" and a default window length
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range, rejecting `end < start`
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidDateRange` when `end` precedes `start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end < start {
            return Err(AppError::invalid_date_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Fill in missing bounds: `end` defaults to `now`, `start` to
    /// `end - default_days`
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidDateRange` when the resolved end precedes the start
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        default_days: i64,
    ) -> AppResult<Self> {
        let end = end.unwrap_or(now);
        let start = start.unwrap_or_else(|| end - Duration::days(default_days));
        Self::new(start, end)
    }

    /// Whether `instant` lies inside the range
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Number of calendar days touched by the range
    #[must_use]
    pub fn day_count(&self) -> usize {
        let days = (self.end.date_naive() - self.start.date_naive()).num_days();
        usize::try_from(days).map_or(1, |d| d + 1)
    }

    /// Calendar days from `start` to `end`, inclusive
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .date_naive()
            .iter_days()
            .take(self.day_count())
            .collect()
    }

    /// Length of the range
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
