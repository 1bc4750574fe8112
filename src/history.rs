use crate::error::{HeatwaveError, Result};
use crate::model::{CommitRecord, DailyCount, DateWindow};
use chrono::NaiveDate;
use std::collections::{btree_map, BTreeMap};
use std::iter::Map;

/// Display name used when every author is aggregated together.
pub const ALL_USERS: &str = "All";

/// Which commits count towards a history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorFilter {
    All,
    /// Case-insensitive substring match on the author name.
    Name(String),
}

impl AuthorFilter {
    pub fn name(name: impl Into<String>) -> Self {
        AuthorFilter::Name(name.into())
    }

    pub fn matches(&self, author: &str) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::Name(needle) => author.to_lowercase().contains(&needle.to_lowercase()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            AuthorFilter::All => ALL_USERS,
            AuthorFilter::Name(name) => name,
        }
    }
}

/// Days of a history in calendar order.
pub type DailyCounts<'a> = Map<btree_map::Iter<'a, NaiveDate, u32>, fn((&'a NaiveDate, &'a u32)) -> DailyCount>;

fn daily((&day, &count): (&NaiveDate, &u32)) -> DailyCount {
    DailyCount { day, count }
}

fn add_count(days: &mut BTreeMap<NaiveDate, u32>, day: NaiveDate, count: u32) {
    let slot = days.entry(day).or_insert(0);
    *slot = slot.saturating_add(count);
}

/// Commit counts per day for one author filter. Days without commits are
/// absent, never stored as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserHistory {
    days: BTreeMap<NaiveDate, u32>,
}

impl UserHistory {
    /// Builds a history from already counted days. Repeated days are summed,
    /// saturating at `u32::MAX`; a zero count is rejected.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = DailyCount>,
    {
        let mut days = BTreeMap::new();
        for DailyCount { day, count } in counts {
            if count == 0 {
                return Err(HeatwaveError::InvalidCount { day });
            }
            add_count(&mut days, day, count);
        }
        Ok(Self { days })
    }

    /// Counts the commits in `records` that match `filter` and fall inside `window`.
    pub fn from_commits(records: &[CommitRecord], filter: &AuthorFilter, window: &DateWindow) -> Self {
        let mut days = BTreeMap::new();
        for record in records {
            if window.contains(record.day) && filter.matches(&record.author) {
                add_count(&mut days, record.day, 1);
            }
        }
        Self { days }
    }

    pub fn get(&self, day: NaiveDate) -> Option<u32> {
        self.days.get(&day).copied()
    }

    pub fn iter<'a>(&'a self) -> DailyCounts<'a> {
        self.days.iter().map(daily as fn((&'a NaiveDate, &'a u32)) -> DailyCount)
    }

    /// Number of days with at least one commit.
    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    pub fn total_commits(&self) -> u64 {
        self.days.values().map(|&c| c as u64).sum()
    }
}

/// Sum of several user histories, keyed by day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedHistory {
    days: BTreeMap<NaiveDate, u32>,
}

impl MergedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every day of `history` into this one. `history` may be a user's
    /// history or another merged one.
    pub fn absorb<H>(&mut self, history: H)
    where
        H: IntoIterator<Item = DailyCount>,
    {
        for DailyCount { day, count } in history {
            add_count(&mut self.days, day, count);
        }
    }

    pub fn get(&self, day: NaiveDate) -> Option<u32> {
        self.days.get(&day).copied()
    }

    pub fn iter<'a>(&'a self) -> DailyCounts<'a> {
        self.days.iter().map(daily as fn((&'a NaiveDate, &'a u32)) -> DailyCount)
    }

    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    pub fn total_commits(&self) -> u64 {
        self.days.values().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<'a> IntoIterator for &'a UserHistory {
    type Item = DailyCount;
    type IntoIter = DailyCounts<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a MergedHistory {
    type Item = DailyCount;
    type IntoIter = DailyCounts<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merges histories by summing counts per day. Absent days count as zero.
/// Accepts user histories as well as already merged ones.
pub fn merge<I>(histories: I) -> MergedHistory
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = DailyCount>,
{
    let mut merged = MergedHistory::new();
    for history in histories {
        merged.absorb(history);
    }
    merged
}
