//! Error types for the booking calendar.

use leptos::prelude::ServerFnError;
use shared_types::TimeSlot;
use thiserror::Error;

/// Failures talking to the remote booking service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network failure or timeout before a response arrived
    #[error("Booking service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status
    #[error("Booking service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Unexpected response from booking service: {0}")]
    InvalidResponse(String),

    /// Error relayed through a server function
    #[error("{0}")]
    Server(String),
}

#[cfg(any(feature = "ssr", test))]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}

impl From<ServerFnError> for ApiError {
    fn from(err: ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError(message) => ApiError::Server(message),
            other => ApiError::Unreachable(other.to_string()),
        }
    }
}

/// Reasons an availability save is refused before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select a date before saving availability.")]
    NoDateSelected,

    #[error("Add at least one time window before saving.")]
    NoWindows,

    #[error("Time window {position}: {reason}")]
    InvalidWindow { position: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotPickerError {
    #[error("No date selected")]
    NoDateSelected,

    #[error("{0} is not an available time")]
    UnknownSlot(TimeSlot),

    #[error("Cannot {action} while {step}")]
    InvalidTransition {
        action: &'static str,
        step: &'static str,
    },

    #[error("Please check your details: {0}")]
    InvalidContact(String),
}

/// Invalid start-up configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Configuration already initialized")]
    AlreadyInitialized,
}
