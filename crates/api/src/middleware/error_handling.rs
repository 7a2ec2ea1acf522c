//! # Error Handling Middleware
//!
//! Maps engine errors to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}`, so every endpoint reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reservation_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Error returned by every handler.
///
/// Handlers use `?` on engine calls (`BookingError`) and on adapter calls
/// (`eyre::Report`); both convert into this type.
#[derive(Debug)]
pub enum AppError {
    /// A failure reported by the reservation engine
    Booking(BookingError),
    /// Missing or wrong admin credentials
    Unauthorized(String),
    /// Anything else, e.g. failing to open or commit a unit of work
    Internal(eyre::Report),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Booking(err) => match err {
                BookingError::SlotNotFound(_) | BookingError::ReservationNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                BookingError::DuplicateSlot(_)
                | BookingError::SlotInUse { .. }
                | BookingError::ReservationConflict(_) => StatusCode::CONFLICT,
                BookingError::SlotUnavailable(_)
                | BookingError::InvalidStatus(_)
                | BookingError::AlreadyDecided(_)
                | BookingError::InvalidDuration(_) => StatusCode::BAD_REQUEST,
                BookingError::Storage(report) => storage_status(report),
            },
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(report) => storage_status(report),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Booking(err) if err.is_client_error() => err.to_string(),
            AppError::Booking(BookingError::Storage(report)) | AppError::Internal(report)
                if reservation_db::is_concurrency_conflict(report) =>
            {
                "the request collided with a concurrent change, please retry".to_string()
            }
            AppError::Booking(_) | AppError::Internal(_) => "internal storage error".to_string(),
            AppError::Unauthorized(message) => message.clone(),
        }
    }
}

fn storage_status(report: &eyre::Report) -> StatusCode {
    if reservation_db::is_concurrency_conflict(report) {
        StatusCode::CONFLICT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::Booking(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError::Internal(err)
    }
}

/// Maps an engine error straight to an HTTP response.
pub fn map_error(err: BookingError) -> Response {
    AppError::Booking(err).into_response()
}
