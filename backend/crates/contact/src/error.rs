//! Contact Error Types
//!
//! Reasons a submission stops short of a successful send. Each variant maps
//! to a kernel [`ErrorKind`] and converts into an [`AppError`] carrying the
//! user-facing toast text.

use std::time::Duration;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::FieldErrors;

/// Contact-specific result type alias
pub type ContactResult<T> = Result<T, ContactError>;

#[derive(Debug, Error)]
pub enum ContactError {
    /// Submitted again too soon after the previous accepted submit
    #[error("Submission debounced")]
    Debounced,

    /// Attempt cap reached and the cooldown is still running
    #[error("Rate limit cooldown active ({remaining_minutes} min remaining)")]
    CoolingDown { remaining_minutes: i64 },

    /// Attempt cap reached inside the burst window
    #[error("Rate limit exceeded")]
    RateLimited,

    /// EmailJS identifiers absent from the deployment configuration
    #[error("Missing email service configuration: {}", .0.join(", "))]
    MissingConfiguration(Vec<&'static str>),

    /// One or more fields failed validation
    #[error("Invalid form fields: {}", .0.len())]
    InvalidFields(FieldErrors),

    /// Input matched an SQL-injection rule
    #[error("Suspicious input detected ({0})")]
    SuspiciousInput(String),

    /// Email service rejected the request or could not be reached
    #[error("Email service failure (status {status:?}): {detail}")]
    Transport { status: Option<u16>, detail: String },

    #[error("Email service timed out after {0:?}")]
    Timeout(Duration),
}

impl ContactError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactError::Debounced
            | ContactError::CoolingDown { .. }
            | ContactError::RateLimited => ErrorKind::TooManyRequests,
            ContactError::MissingConfiguration(_) => ErrorKind::Configuration,
            ContactError::InvalidFields(_) => ErrorKind::InvalidInput,
            ContactError::SuspiciousInput(_) => ErrorKind::SuspiciousInput,
            ContactError::Transport { .. } | ContactError::Timeout(_) => ErrorKind::Transport,
        }
    }

    /// Convert to the user-facing error
    ///
    /// ## Arguments
    /// * `fallback_contact` - address offered when the form cannot deliver
    pub fn to_app_error(&self, fallback_contact: &str) -> AppError {
        match self {
            ContactError::Debounced => {
                AppError::too_many_requests("Please wait a moment before submitting.")
            }
            ContactError::CoolingDown { remaining_minutes } => AppError::too_many_requests(
                format!("Too many attempts. Please wait {remaining_minutes} minutes."),
            ),
            ContactError::RateLimited => {
                AppError::too_many_requests("Too many attempts. Please slow down.")
            }
            ContactError::MissingConfiguration(_) => AppError::configuration(
                "Email configuration is missing. Please contact me directly.",
            )
            .with_description(fallback_contact.to_string()),
            ContactError::InvalidFields(_) => {
                AppError::invalid_input("Please fix the errors in the form.")
            }
            ContactError::SuspiciousInput(_) => {
                AppError::suspicious_input("Suspicious input detected. Please check your message.")
            }
            ContactError::Transport { .. } | ContactError::Timeout(_) => {
                AppError::transport("Failed to send message. Please try again later.")
                    .with_description(format!("Or contact me directly at {fallback_contact}"))
            }
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            ContactError::MissingConfiguration(missing) => {
                tracing::error!(missing = ?missing, "Email service configuration missing");
            }
            ContactError::Transport { status, detail } => {
                tracing::error!(status = ?status, detail = %detail, "Email sending failed");
            }
            ContactError::Timeout(after) => {
                tracing::error!(timeout = ?after, "Email sending timed out");
            }
            ContactError::SuspiciousInput(rule) => {
                tracing::warn!(rule = %rule, "Suspicious input rejected");
            }
            ContactError::CoolingDown { remaining_minutes } => {
                tracing::warn!(remaining_minutes, "Submission blocked by cooldown");
            }
            ContactError::RateLimited => {
                tracing::warn!("Submission rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Submission rejected");
            }
        }
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}
