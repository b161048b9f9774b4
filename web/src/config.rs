//! Start-up configuration, resolved once from the environment.
//!
//! Only [`CalendarSettings`] reaches the browser; the environment loading
//! and the process-wide [`AppConfig`] exist on the server.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarState, DayPolicy};

#[cfg(any(feature = "ssr", test))]
mod env;

#[cfg(any(feature = "ssr", test))]
pub use env::{get, init, AppConfig};

pub const API_URL_VAR: &str = "BOOKING_API_URL";
pub const API_TIMEOUT_VAR: &str = "BOOKING_API_TIMEOUT_SECS";
pub const MONTHS_AHEAD_VAR: &str = "BOOKING_MONTHS_AHEAD";
pub const DISALLOWED_DAYS_VAR: &str = "BOOKING_DISALLOWED_DAYS";

const DEFAULT_MONTHS_AHEAD: u32 = 1;
const DEFAULT_DISALLOWED_DAYS: [u32; 5] = [5, 10, 15, 20, 25];

/// Calendar rules shared with the browser through `get_calendar_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// How many months past the current one can be displayed.
    pub months_ahead: u32,
    /// Day-of-month numbers clients can never book.
    pub disallowed_days: Vec<u32>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            months_ahead: DEFAULT_MONTHS_AHEAD,
            disallowed_days: DEFAULT_DISALLOWED_DAYS.to_vec(),
        }
    }
}

impl CalendarSettings {
    pub fn client_policy(&self) -> DayPolicy {
        DayPolicy::ExcludeDaysOfMonth(self.disallowed_days.clone())
    }

    pub fn admin_calendar(&self, today: NaiveDate) -> CalendarState {
        CalendarState::new(today, self.months_ahead, DayPolicy::AnyDay)
    }

    pub fn client_calendar(&self, today: NaiveDate) -> CalendarState {
        CalendarState::new(today, self.months_ahead, self.client_policy())
    }

    /// Applies these settings to a live admin calendar; see
    /// [`CalendarState::reconfigure`].
    pub fn configure_admin(
        &self,
        calendar: &mut CalendarState,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        calendar.reconfigure(today, self.months_ahead, DayPolicy::AnyDay)
    }

    pub fn configure_client(
        &self,
        calendar: &mut CalendarState,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        calendar.reconfigure(today, self.months_ahead, self.client_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendars_follow_settings() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let settings = CalendarSettings::default();

        let admin = settings.admin_calendar(today);
        assert!(!admin.is_disabled(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));

        let client = settings.client_calendar(today);
        assert!(client.is_disabled(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
        assert_eq!(client.bounds().latest().label(), "April 2025");
    }

    #[test]
    fn configuring_a_live_calendar_keeps_its_selection() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let picked = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let mut calendar = CalendarSettings::default().client_calendar(today);
        calendar.select_date(Some(picked));

        let settings = CalendarSettings {
            months_ahead: 2,
            disallowed_days: vec![12],
        };
        assert_eq!(settings.configure_admin(&mut calendar, today), None);
        assert_eq!(calendar.selected(), Some(picked));
        assert_eq!(calendar.bounds().latest().label(), "May 2025");

        assert_eq!(settings.configure_client(&mut calendar, today), Some(picked));
        assert_eq!(calendar.selected(), None);
    }
}
