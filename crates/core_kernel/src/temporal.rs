//! Due-date windows
//!
//! Letters expire and credits mature on a calendar date. The dashboard
//! classifies each date relative to "today":
//! - **Upcoming**: due today or within the next [`UPCOMING_WINDOW_DAYS`] days
//! - **Overdue**: due strictly before today
//!
//! The two states never overlap. Status gating (only active letters count as
//! overdue, and so on) is left to the caller.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed horizon of the upcoming window, in days
pub const UPCOMING_WINDOW_DAYS: u64 = 30;

/// Where a due date falls relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    /// Due within `[today, today + horizon]`
    Upcoming,
    /// Due before today
    Overdue,
}

/// A window anchored at a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    today: NaiveDate,
    horizon_end: NaiveDate,
}

impl DueWindow {
    /// Creates the standard 30-day window starting at `today`
    pub fn starting(today: NaiveDate) -> Self {
        let horizon_end = today
            .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self { today, horizon_end }
    }

    /// The reference date
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Last day still counted as upcoming
    pub fn horizon_end(&self) -> NaiveDate {
        self.horizon_end
    }

    /// Classifies a due date; `None` when it is further out than the horizon
    pub fn classify(&self, due: NaiveDate) -> Option<DueState> {
        if due < self.today {
            Some(DueState::Overdue)
        } else if due <= self.horizon_end {
            Some(DueState::Upcoming)
        } else {
            None
        }
    }

    /// Returns true when `due` is in the upcoming window
    pub fn is_upcoming(&self, due: NaiveDate) -> bool {
        self.classify(due) == Some(DueState::Upcoming)
    }

    /// Returns true when `due` is before today
    pub fn is_overdue(&self, due: NaiveDate) -> bool {
        self.classify(due) == Some(DueState::Overdue)
    }
}
