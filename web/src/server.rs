use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::server;
use shared_types::{BookingRequest, SaveAvailabilityRequest, TimeSlot, TimeWindow};

use crate::config::CalendarSettings;
#[cfg(feature = "ssr")]
use crate::error::ApiError;

#[cfg(feature = "ssr")]
fn relay(context: &str, err: ApiError) -> ServerFnError {
    tracing::error!(error = %err, "{}", context);
    ServerFnError::new(err)
}

#[server]
pub async fn get_calendar_settings() -> Result<CalendarSettings, ServerFnError> {
    match crate::config::get() {
        Some(config) => Ok(config.calendar.clone()),
        None => {
            tracing::warn!("Configuration not initialized, using default calendar settings");
            Ok(CalendarSettings::default())
        }
    }
}

#[server]
pub async fn get_day_windows(date: NaiveDate) -> Result<Vec<TimeWindow>, ServerFnError> {
    let client = crate::api::get_client().map_err(|e| relay("Booking API unavailable", e))?;

    match client.fetch_day_windows(date).await {
        Ok(windows) => {
            tracing::debug!(%date, count = windows.len(), "Loaded availability windows");
            Ok(windows)
        }
        Err(e) => Err(relay("Failed to fetch availability windows", e)),
    }
}

#[server]
pub async fn save_day_windows(request: SaveAvailabilityRequest) -> Result<(), ServerFnError> {
    let client = crate::api::get_client().map_err(|e| relay("Booking API unavailable", e))?;

    match client.save_day_windows(&request).await {
        Ok(()) => {
            tracing::info!(date = %request.date, windows = request.time_slots.len(), "Availability saved");
            Ok(())
        }
        Err(e) => Err(relay("Failed to save availability", e)),
    }
}

#[server]
pub async fn get_available_times(date: NaiveDate) -> Result<Vec<TimeSlot>, ServerFnError> {
    let client = crate::api::get_client().map_err(|e| relay("Booking API unavailable", e))?;

    match client.fetch_available_times(date).await {
        Ok(times) => Ok(times),
        Err(e) => Err(relay("Failed to fetch available times", e)),
    }
}

#[server]
pub async fn submit_booking(request: BookingRequest) -> Result<(), ServerFnError> {
    let client = crate::api::get_client().map_err(|e| relay("Booking API unavailable", e))?;

    match client.submit_booking(&request).await {
        Ok(()) => {
            tracing::info!(date = %request.date, time = %request.time, "Booking submitted");
            Ok(())
        }
        Err(e) => Err(relay("Failed to submit booking", e)),
    }
}
