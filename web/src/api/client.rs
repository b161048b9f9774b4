use chrono::NaiveDate;
use reqwest::{Client, Response};
use shared_types::{
    format_date, ApiErrorBody, AvailabilityResponse, BookingRequest, SaveAvailabilityRequest,
    TimeSlot, TimeWindow,
};

use crate::error::ApiError;

/// HTTP client for the remote availability and booking service.
#[derive(Debug, Clone)]
pub struct BookingApiClient {
    base_url: String,
    http: Client,
}

impl BookingApiClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn availability_url(&self, date: NaiveDate, admin: bool) -> String {
        let mut url = format!(
            "{}/availability?date={}",
            self.base_url,
            urlencoding::encode(&format_date(date))
        );
        if admin {
            url.push_str("&view=admin");
        }
        url
    }

    async fn get_availability(&self, date: NaiveDate, admin: bool) -> Result<AvailabilityResponse, ApiError> {
        let url = self.availability_url(date, admin);
        tracing::debug!(%url, "Fetching availability");
        let response = ensure_success(self.http.get(&url).send().await?).await?;
        Ok(response.json::<AvailabilityResponse>().await?)
    }

    /// Time windows the admin has already opened on `date`.
    pub async fn fetch_day_windows(&self, date: NaiveDate) -> Result<Vec<TimeWindow>, ApiError> {
        let body = self.get_availability(date, true).await?;
        Ok(body.time_slots.unwrap_or_default())
    }

    /// Times a client can still book on `date`.
    pub async fn fetch_available_times(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, ApiError> {
        let body = self.get_availability(date, false).await?;
        Ok(body.available_times.unwrap_or_default())
    }

    pub async fn save_day_windows(&self, request: &SaveAvailabilityRequest) -> Result<(), ApiError> {
        let url = format!("{}/availability", self.base_url);
        tracing::debug!(%url, date = %request.date, windows = request.time_slots.len(), "Saving availability");
        ensure_success(self.http.post(&url).json(request).send().await?).await?;
        Ok(())
    }

    pub async fn submit_booking(&self, request: &BookingRequest) -> Result<(), ApiError> {
        let url = format!("{}/bookings", self.base_url);
        tracing::debug!(%url, date = %request.date, time = %request.time, "Submitting booking");
        ensure_success(self.http.post(&url).json(request).send().await?).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into `ApiError::Rejected`, keeping the
/// service's `{error}` message when it sent one.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
