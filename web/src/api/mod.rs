pub mod client;

pub use client::BookingApiClient;

use std::sync::OnceLock;

use crate::config::AppConfig;
use crate::error::ApiError;

static API_CLIENT: OnceLock<BookingApiClient> = OnceLock::new();

/// Builds the process-wide client from `config`. Call once at start-up.
pub fn init_client(config: &AppConfig) -> Result<(), ApiError> {
    let client = BookingApiClient::new(config.api_base_url.clone(), config.api_timeout_secs)?;
    API_CLIENT
        .set(client)
        .map_err(|_| ApiError::Unreachable("booking API client already initialized".to_string()))
}

pub fn get_client() -> Result<&'static BookingApiClient, ApiError> {
    API_CLIENT
        .get()
        .ok_or_else(|| ApiError::Unreachable("booking API client not initialized".to_string()))
}
