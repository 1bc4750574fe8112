use crate::history::MergedHistory;
use crate::intensity::{classify, IntensityLevel, ShadeOffset};
use crate::model::DateWindow;
use chrono::{Datelike, NaiveDate, Weekday};

/// Row order of the grid, top to bottom.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Row a day belongs to, Sunday being 0.
pub fn row_index(day: NaiveDate) -> usize {
    day.weekday().num_days_from_sunday() as usize
}

/// One position of the grid as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// No commits that day.
    Blank { day: NaiveDate },
    Active {
        day: NaiveDate,
        count: u32,
        level: IntensityLevel,
    },
}

/// Days of a window laid out in seven weekday rows, one column per week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarGrid {
    rows: [Vec<NaiveDate>; 7],
}

impl CalendarGrid {
    pub fn build(window: &DateWindow) -> Self {
        Self::for_range(window.start(), window.end())
    }

    /// Lays out `start..=end`, starting from the first Sunday on or after
    /// `start` so the leftmost column is a full week. When no Sunday falls in
    /// the range the grid starts at `start`. A reversed range gives an empty
    /// grid.
    pub fn for_range(start: NaiveDate, end: NaiveDate) -> Self {
        let mut rows: [Vec<NaiveDate>; 7] = Default::default();
        if end < start {
            return Self { rows };
        }

        let first = align_to_sunday(start, end);
        for day in first.iter_days().take_while(|&day| day <= end) {
            rows[row_index(day)].push(day);
        }
        Self { rows }
    }

    pub fn row(&self, weekday: Weekday) -> &[NaiveDate] {
        &self.rows[weekday.num_days_from_sunday() as usize]
    }

    /// Rows in display order, Sunday first.
    pub fn rows(&self) -> impl Iterator<Item = (Weekday, &[NaiveDate])> + '_ {
        WEEKDAYS
            .iter()
            .zip(self.rows.iter())
            .map(|(&weekday, days)| (weekday, days.as_slice()))
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.rows.iter().filter_map(|days| days.first().copied()).min()
    }

    /// Number of columns.
    pub fn weeks(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Classifies every day of the grid against `history`, row by row.
    pub fn cells<'a>(
        &'a self,
        history: &'a MergedHistory,
        offset: ShadeOffset,
    ) -> impl Iterator<Item = (Weekday, Vec<Cell>)> + 'a {
        self.rows().map(move |(weekday, days)| {
            let cells = days
                .iter()
                .map(|&day| {
                    let classified = history
                        .get(day)
                        .and_then(|count| classify(count, offset).map(|level| (count, level)));
                    match classified {
                        Some((count, level)) => Cell::Active { day, count, level },
                        None => Cell::Blank { day },
                    }
                })
                .collect();
            (weekday, cells)
        })
    }
}

fn align_to_sunday(start: NaiveDate, end: NaiveDate) -> NaiveDate {
    start
        .iter_days()
        .take(7)
        .take_while(|&day| day <= end)
        .find(|day| day.weekday() == Weekday::Sun)
        .unwrap_or(start)
}
