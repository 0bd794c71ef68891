//! Calendar arithmetic shared by the date pickers.

use chrono::{Datelike, NaiveDate, Weekday};

/// Number of columns in the day grid.
pub const DATE_COLUMNS: usize = 7;
/// Number of rows in the day grid.
pub const DATE_ROWS: usize = 6;

/// A year and month pair used for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year/month pair if the month is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the month, if representable.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Adds or subtracts months, adjusting the year as needed.
    pub fn add_months(&self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves `date` to `year`, clamping the day to the target month's length
/// (Feb 29 becomes Feb 28 in a common year).
pub fn with_year_clamped(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
}

/// The seven weekdays starting at `first_day_of_week`.
pub fn weekday_sequence(first_day_of_week: Weekday) -> [Weekday; DATE_COLUMNS] {
    let mut days = [first_day_of_week; DATE_COLUMNS];
    let mut day = first_day_of_week;
    for slot in days.iter_mut() {
        *slot = day;
        day = day.succ();
    }
    days
}

/// Lays out `month` on a 7x6 grid. Cells outside the month are `None`.
pub fn build_month_grid(month: YearMonth, first_day_of_week: Weekday) -> Vec<Option<NaiveDate>> {
    let mut cells = vec![None; DATE_COLUMNS * DATE_ROWS];
    let Some(first_date) = month.first_day() else {
        return cells;
    };
    let offset = (first_date.weekday().num_days_from_monday() as i32
        - first_day_of_week.num_days_from_monday() as i32)
        .rem_euclid(7) as usize;
    for day in 1..=month.days_in_month() {
        let index = offset + day as usize - 1;
        if index < cells.len() {
            cells[index] = NaiveDate::from_ymd_opt(month.year(), month.month(), day);
        }
    }
    cells
}
