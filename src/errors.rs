use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Message returned to callers for every server-side failure.
///
/// The underlying cause is only ever written to the logs.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit booking or send message";

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Request used a method other than POST.
    MethodNotAllowed,
    /// Request body could not be read as a reservation.
    BadPayload(String),
    /// A credential or identifier is missing from the environment.
    Misconfigured(String),
    /// Error interacting with the bookings database.
    ExternalApiError(String),
    /// The messaging bot rejected or never received the notification.
    NotificationFailed(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::BadPayload(msg) => write!(f, "Bad payload: {}", msg),
            AppError::Misconfigured(msg) => write!(f, "Misconfigured: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::NotificationFailed(msg) => write!(f, "Notification failed: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::WithContext { source, .. } => source.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Innermost error, skipping context wrappers.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    /// Maps the error to a status code and an opaque JSON body.
    ///
    /// Everything except a wrong method collapses into one generic 500 so
    /// upstream error bodies never reach the caller.
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::MethodNotAllowed => {
                tracing::warn!("Rejected request with disallowed method");
                return (status, Json(json!({ "message": "Method not allowed" }))).into_response();
            }
            AppError::BadPayload(msg) => tracing::error!("Bad payload: {}", msg),
            AppError::Misconfigured(msg) => tracing::error!("Misconfiguration: {}", msg),
            AppError::ExternalApiError(msg) => tracing::error!("External API error: {}", msg),
            AppError::NotificationFailed(msg) => tracing::error!("Notification failed: {}", msg),
            AppError::WithContext { source, context } => {
                // Log full context chain for debugging
                tracing::error!("Error with context: {} -> {}", context, source);
            }
        }

        (status, Json(json!({ "error": GENERIC_FAILURE_MESSAGE }))).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadPayload(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
