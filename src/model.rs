use crate::error::{HeatwaveError, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Length of one heat map "year", counted back from the window's end.
pub const WINDOW_DAYS: u64 = 365;

/// Most windows one invocation may ask for.
pub const MAX_YEARS: u32 = 100;

/// One commit reduced to what the heat map needs: the calendar day it landed
/// on and who wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub day: NaiveDate,
    pub author: String,
}

impl CommitRecord {
    pub fn new(day: NaiveDate, author: impl Into<String>) -> Self {
        Self {
            day,
            author: author.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: u32,
}

/// Inclusive range of calendar days covered by one heat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(HeatwaveError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window of `WINDOW_DAYS` ending at `end`.
    pub fn trailing_year(end: NaiveDate) -> Self {
        let start = end
            .checked_sub_days(Days::new(WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// The year before this one. Its end is this window's start.
    pub fn previous(&self) -> Self {
        Self::trailing_year(self.start)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a commit on `day` is counted in this window. The start day is
    /// the end of the previous window and is counted there, so consecutive
    /// windows never share a commit.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start < day && day <= self.end
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOutput {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowOutput {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: usize,
    pub total_commits: u64,
    pub days: Vec<DayOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub users: Vec<String>,
    pub shade_offset: u32,
    pub windows: Vec<WindowOutput>,
}
