use chrono::{Datelike, Month, NaiveDate};

/// Two-digit day of month shown on empty cells in verbose mode.
pub fn day_label(day: NaiveDate) -> String {
    format!("{:02}", day.day())
}

/// Abbreviated names of the twelve months ending with `end`'s month,
/// oldest first.
pub fn month_labels(end: NaiveDate) -> Vec<&'static str> {
    let last = end.year() * 12 + end.month0() as i32;
    (last - 11..=last)
        .filter_map(|index| u8::try_from(index.rem_euclid(12) + 1).ok())
        .filter_map(|number| Month::try_from(number).ok())
        .map(|month| &month.name()[..3])
        .collect()
}
