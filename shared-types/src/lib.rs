use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date format used on every endpoint of the booking service.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// An admin-defined opening interval for one date, as two "HH:MM" strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TimeWindow {
    pub from: String,
    pub to: String,
}

impl TimeWindow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A single bookable "HH:MM" instant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TimeSlot(pub String);

impl TimeSlot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimeSlot {
    fn from(value: &str) -> Self {
        TimeSlot(value.to_string())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `GET /availability`. The admin view reads `timeSlots`, the
/// client view reads `availableTimes`; either may be missing.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub time_slots: Option<Vec<TimeWindow>>,
    pub available_times: Option<Vec<TimeSlot>>,
}

/// Body of `POST /availability`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveAvailabilityRequest {
    pub date: NaiveDate,
    pub time_slots: Vec<TimeWindow>,
}

/// Body of `POST /bookings`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
}

/// Error body returned by the booking service on a failed write.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn march_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn save_request_uses_calendar_date_and_camel_case() {
        let request = SaveAvailabilityRequest {
            date: march_10(),
            time_slots: vec![TimeWindow::new("09:00", "10:00")],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "date": "2025-03-10", "timeSlots": [{ "from": "09:00", "to": "10:00" }] })
        );
    }

    #[test]
    fn booking_request_serializes_time_as_plain_string() {
        let request = BookingRequest {
            name: "Anna Rossi".to_string(),
            email: "a@x.com".to_string(),
            date: march_10(),
            time: TimeSlot::from("10:30"),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "name": "Anna Rossi", "email": "a@x.com", "date": "2025-03-10", "time": "10:30" })
        );
    }

    #[test]
    fn availability_response_tolerates_missing_fields() {
        let empty: AvailabilityResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AvailabilityResponse::default());

        let admin: AvailabilityResponse =
            serde_json::from_str(r#"{"timeSlots":[{"from":"09:00","to":"10:00"}]}"#).unwrap();
        assert_eq!(admin.time_slots, Some(vec![TimeWindow::new("09:00", "10:00")]));
        assert_eq!(admin.available_times, None);
    }

    #[test]
    fn format_date_is_iso_calendar_date() {
        assert_eq!(format_date(march_10()), "2025-03-10");
    }
}
