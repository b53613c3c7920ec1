//! Failure kinds of the scheduling core.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use super::BookingRules;
use crate::domain::Error;

/// Timing of the reservation a request collided with.
///
/// Carries no customer data so it can be shown to any requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservedWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Why a booking operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("date must use the YYYY-MM-DD format, got '{value}'")]
    InvalidDateFormat { value: String },
    #[error("time must use the HH:mm format, got '{value}'")]
    InvalidTimeFormat { value: String },
    #[error("cannot book {date}: dates before {today} are closed")]
    DateInPast { date: NaiveDate, today: NaiveDate },
    #[error("duration must be between {min} and {max} minutes in steps of {step}")]
    InvalidDuration { min: u32, max: u32, step: u32 },
    #[error("reservation must end after it starts")]
    InvalidInterval,
    #[error("resource {id} does not exist")]
    InvalidResource { id: String },
    #[error("slot overlaps an existing reservation from {} to {}", .window.start, .window.end)]
    Conflict { window: ReservedWindow },
    #[error("booking store unavailable: {message}")]
    StorageUnavailable { message: String },
    #[error("booking write interrupted: {message}")]
    Interrupted { message: String },
}

impl BookingError {
    pub(crate) fn invalid_duration(rules: &BookingRules) -> Self {
        Self::InvalidDuration {
            min: rules.min_duration_minutes(),
            max: rules.max_duration_minutes(),
            step: rules.step_minutes(),
        }
    }

    /// Stable snake_case tag for clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidDateFormat { .. } => "invalid_date_format",
            Self::InvalidTimeFormat { .. } => "invalid_time_format",
            Self::DateInPast { .. } => "date_in_past",
            Self::InvalidDuration { .. } => "invalid_duration",
            Self::InvalidInterval => "invalid_interval",
            Self::InvalidResource { .. } => "invalid_resource",
            Self::Conflict { .. } => "conflict",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::Interrupted { .. } => "interrupted",
        }
    }
}

impl From<BookingError> for Error {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        let code = err.code();
        match err {
            BookingError::MissingField { field } => Error::invalid_request(message)
                .with_details(json!({ "code": code, "field": field })),
            BookingError::InvalidDateFormat { value } | BookingError::InvalidTimeFormat { value } => {
                Error::invalid_request(message).with_details(json!({ "code": code, "value": value }))
            }
            BookingError::DateInPast { date, today } => Error::invalid_request(message)
                .with_details(json!({ "code": code, "date": date, "today": today })),
            BookingError::InvalidDuration { min, max, step } => Error::invalid_request(message)
                .with_details(json!({ "code": code, "min": min, "max": max, "step": step })),
            BookingError::InvalidInterval => {
                Error::invalid_request(message).with_details(json!({ "code": code }))
            }
            BookingError::InvalidResource { id } => Error::invalid_request(message)
                .with_details(json!({ "code": code, "resourceId": id })),
            BookingError::Conflict { window } => Error::conflict(message)
                .with_details(json!({ "code": code, "conflict": window })),
            BookingError::StorageUnavailable { .. } => {
                Error::service_unavailable(message).with_details(json!({ "code": code }))
            }
            BookingError::Interrupted { .. } => {
                Error::internal(message).with_details(json!({ "code": code }))
            }
        }
    }
}
