//! Month grid layout, navigation bounds and date selection.
//!
//! Everything here is plain data so it can be shared by the admin and the
//! client calendars and tested without a reactive runtime.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

/// Column headers of the grid, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A year + month pair, stored as its first day so ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days().last().unwrap_or(self.first)
    }

    /// Every date of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first.month();
        self.first.iter_days().take_while(move |d| d.month() == month)
    }

    pub fn days_in_month(&self) -> u32 {
        self.days().count() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
    }

    /// The month `months` after this one.
    pub fn offset(&self, months: u32) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(months))
            .map(|first| Self { first })
    }

    /// Display label such as "March 2025".
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Today's wall-clock date where the code runs (the browser after hydration).
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Column of `date` in a Monday-first week (Monday = 0, Sunday = 6).
pub fn weekday_index_monday_first(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Grid cells for `month`: leading blanks so the first day lands under its
/// weekday column, followed by every date of the month.
pub fn calendar_days(month: CalendarMonth) -> Vec<Option<NaiveDate>> {
    let blanks = weekday_index_monday_first(month.first_day());
    let mut cells = Vec::with_capacity(blanks + 31);
    cells.extend(std::iter::repeat(None).take(blanks));
    cells.extend(month.days().map(Some));
    cells
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Inclusive range of months the calendar may display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationBounds {
    earliest: CalendarMonth,
    latest: CalendarMonth,
}

impl NavigationBounds {
    pub fn new(earliest: CalendarMonth, latest: CalendarMonth) -> Self {
        if latest < earliest {
            Self { earliest: latest, latest: earliest }
        } else {
            Self { earliest, latest }
        }
    }

    /// `[start, start + months_ahead]`.
    pub fn from_start(start: CalendarMonth, months_ahead: u32) -> Self {
        Self::new(start, start.offset(months_ahead).unwrap_or(start))
    }

    pub fn earliest(&self) -> CalendarMonth {
        self.earliest
    }

    pub fn latest(&self) -> CalendarMonth {
        self.latest
    }

    pub fn contains(&self, month: CalendarMonth) -> bool {
        self.earliest <= month && month <= self.latest
    }
}

/// Decides whether a date can be offered at all, independently of it being
/// in the past.
pub trait BookableDays {
    fn is_day_bookable(&self, date: NaiveDate) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayPolicy {
    /// Every date is bookable (admin calendar).
    AnyDay,
    /// These day-of-month numbers are closed in every month.
    ExcludeDaysOfMonth(Vec<u32>),
}

impl BookableDays for DayPolicy {
    fn is_day_bookable(&self, date: NaiveDate) -> bool {
        match self {
            DayPolicy::AnyDay => true,
            DayPolicy::ExcludeDaysOfMonth(days) => !days.contains(&date.day()),
        }
    }
}

/// One rendered date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    pub date: NaiveDate,
    pub is_past: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Displayed month, navigation bounds and the single selected date.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    today: NaiveDate,
    displayed: CalendarMonth,
    bounds: NavigationBounds,
    selected: Option<NaiveDate>,
    policy: DayPolicy,
}

impl CalendarState {
    /// Calendar opened on the month of `today`, navigable up to
    /// `months_ahead` months later.
    pub fn new(today: NaiveDate, months_ahead: u32, policy: DayPolicy) -> Self {
        let start = CalendarMonth::of(today);
        Self::with_bounds(today, NavigationBounds::from_start(start, months_ahead), policy)
    }

    pub fn with_bounds(today: NaiveDate, bounds: NavigationBounds, policy: DayPolicy) -> Self {
        let current = CalendarMonth::of(today);
        let displayed = if bounds.contains(current) {
            current
        } else {
            bounds.earliest()
        };

        Self {
            today,
            displayed,
            bounds,
            selected: None,
            policy,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn displayed(&self) -> CalendarMonth {
        self.displayed
    }

    pub fn bounds(&self) -> NavigationBounds {
        self.bounds
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn policy(&self) -> &DayPolicy {
        &self.policy
    }

    pub fn is_past(&self, date: NaiveDate) -> bool {
        date < self.today
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.is_past(date) || !self.policy.is_day_bookable(date)
    }

    /// Selects `day` and returns it when the selection actually changed, so
    /// the caller knows to reset and reload the dependent panel.
    ///
    /// Blank cells, past dates, non-bookable dates and the current selection
    /// are ignored.
    pub fn select_date(&mut self, day: Option<NaiveDate>) -> Option<NaiveDate> {
        let date = day?;
        if self.is_disabled(date) || self.selected == Some(date) {
            return None;
        }
        self.selected = Some(date);
        Some(date)
    }

    /// Re-anchors the calendar on `today` with new bounds and day policy.
    /// The displayed month and the selection survive while they are still
    /// valid; a selection that no longer is gets dropped and returned so
    /// the dependent panel can be cleared.
    pub fn reconfigure(
        &mut self,
        today: NaiveDate,
        months_ahead: u32,
        policy: DayPolicy,
    ) -> Option<NaiveDate> {
        let current = CalendarMonth::of(today);
        self.today = today;
        self.bounds = NavigationBounds::from_start(current, months_ahead);
        self.policy = policy;
        if !self.bounds.contains(self.displayed) {
            self.displayed = current;
        }

        let selected = self.selected?;
        if self.is_disabled(selected) || !self.bounds.contains(CalendarMonth::of(selected)) {
            self.selected = None;
            return Some(selected);
        }
        None
    }

    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.step(direction)
            .map(|month| self.bounds.contains(month))
            .unwrap_or(false)
    }

    /// Moves the displayed month; returns `false` and stays put at the
    /// bounds.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match self.step(direction) {
            Some(month) if self.bounds.contains(month) => {
                self.displayed = month;
                true
            }
            _ => false,
        }
    }

    fn step(&self, direction: Direction) -> Option<CalendarMonth> {
        match direction {
            Direction::Previous => self.displayed.prev(),
            Direction::Next => self.displayed.next(),
        }
    }

    pub fn day(&self, date: NaiveDate) -> Day {
        Day {
            date,
            is_past: self.is_past(date),
            is_today: date == self.today,
            is_selected: self.selected == Some(date),
            is_disabled: self.is_disabled(date),
        }
    }

    /// Attributed grid cells of the displayed month.
    pub fn days(&self) -> Vec<Option<Day>> {
        calendar_days(self.displayed)
            .into_iter()
            .map(|cell| cell.map(|date| self.day(date)))
            .collect()
    }
}
