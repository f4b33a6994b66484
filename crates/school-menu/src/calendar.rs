//! School day selection and day labels

use core::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

/// True for Monday through Friday
pub fn is_school_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first `count` school days on or after `start`
///
/// `start` itself is included when it is a weekday.
pub fn next_school_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start
        .iter_days()
        .filter(|d| is_school_day(*d))
        .take(count)
        .collect()
}

/// Header text for a day relative to the render date
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DayLabel {
    /// The render date
    Today,
    /// The calendar day after the render date
    Tomorrow,
    /// Any other day, by weekday name
    Weekday(Weekday),
}

impl DayLabel {
    /// Label `date` as seen from `today`
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        match date.signed_duration_since(today).num_days() {
            0 => DayLabel::Today,
            1 => DayLabel::Tomorrow,
            _ => DayLabel::Weekday(date.weekday()),
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Today => f.write_str("Today"),
            DayLabel::Tomorrow => f.write_str("Tomorrow"),
            DayLabel::Weekday(day) => f.write_str(weekday_name(*day)),
        }
    }
}

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Multi-day header: label plus ` MM/DD` when dates are shown
pub fn day_header(date: NaiveDate, today: NaiveDate, show_date: bool) -> String {
    let label = DayLabel::for_date(date, today);
    if show_date {
        format!("{label} {}", date.format("%m/%d"))
    } else {
        label.to_string()
    }
}

/// Single-day date line, e.g. `Monday, January 06`
pub fn full_date(date: NaiveDate) -> String {
    date.format("%A, %B %d").to_string()
}
