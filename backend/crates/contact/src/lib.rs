//! Contact Form Guard
//!
//! Clean Architecture structure:
//! - `domain/` - Form entities, detection patterns, sanitizer, collaborator traits
//! - `application/` - Configuration and use cases (rate limit, validation, guard)
//! - `infra/` - EmailJS client and rate-limit record persistence
//!
//! ## Security Model
//! - Every check runs on the submitting client; none of it is a security boundary
//! - A filled honeypot is answered with a fake success, never an error
//! - Rate-limit attempts are counted before validation and are never refunded

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::{EmailServiceConfig, GuardConfig};
pub use application::guard::{SubmissionGuard, SubmissionOutcome};
pub use application::status::FormStatus;
pub use domain::entities::{ContactForm, EmailPayload};
pub use domain::repository::{EmailSender, Notifier, RateLimitRepository};
pub use domain::services::sanitize;
pub use domain::value_objects::{FieldErrors, FormField, Toast, ToastLevel};
pub use error::{ContactError, ContactResult};
pub use infra::emailjs::EmailJsSender;
pub use infra::record_store::StoredRateLimitRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
