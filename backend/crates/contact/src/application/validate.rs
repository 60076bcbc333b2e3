//! Validate Submission Use Case
//!
//! Field rules are independent and all reported together. The SQL-pattern
//! check over the joined fields overrides them with a single
//! suspicious-input failure.

use std::sync::Arc;

use crate::application::config::GuardConfig;
use crate::domain::entities::{ContactForm, SanitizedFields};
use crate::domain::services::{has_valid_name_chars, is_valid_email};
use crate::domain::value_objects::{FieldErrors, FormField};
use crate::error::{ContactError, ContactResult};

const SPAM_MESSAGE: &str = "Your message appears to be spam. Please revise it.";

/// Form validator
pub struct ValidateSubmissionUseCase {
    config: Arc<GuardConfig>,
}

impl ValidateSubmissionUseCase {
    pub fn new(config: Arc<GuardConfig>) -> Self {
        Self { config }
    }

    /// Validate the sanitized form
    ///
    /// ## Returns
    /// * `Ok(SanitizedFields)` - every field passed
    /// * `Err(ContactError::SuspiciousInput)` - an SQL rule matched
    /// * `Err(ContactError::InvalidFields)` - per-field messages
    pub fn validate(&self, form: &ContactForm) -> ContactResult<SanitizedFields> {
        let fields = SanitizedFields::from_form(form);
        let config = &self.config;
        let mut errors = FieldErrors::new();

        for field in [FormField::FirstName, FormField::LastName] {
            if let Some(message) = self.check_name(field, fields.field(field)) {
                errors.insert(field, message);
            }
        }

        if let Some(message) = self.check_email(&fields.email) {
            errors.insert(FormField::Email, message);
        }

        if let Some(message) = check_length(
            FormField::Subject,
            &fields.subject,
            config.subject_min_len,
            config.subject_max_len,
        ) {
            errors.insert(FormField::Subject, message);
        }

        if let Some(message) = check_length(
            FormField::Message,
            &fields.message,
            config.message_min_len,
            config.message_max_len,
        ) {
            errors.insert(FormField::Message, message);
        }

        if let Some(rule) = config.sql_patterns.first_match(&fields.joined()) {
            return Err(ContactError::SuspiciousInput(rule.label.to_string()));
        }

        if config.spam_patterns.is_match(&fields.message)
            || config.spam_patterns.is_match(&fields.subject)
        {
            errors.insert(FormField::Message, SPAM_MESSAGE);
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(ContactError::InvalidFields(errors))
        }
    }

    fn check_name(&self, field: FormField, value: &str) -> Option<String> {
        check_length(field, value, self.config.name_min_len, self.config.name_max_len).or_else(
            || {
                (!has_valid_name_chars(value))
                    .then(|| format!("{} contains invalid characters", field.label()))
            },
        )
    }

    fn check_email(&self, email: &str) -> Option<String> {
        if email.is_empty() {
            Some("Email is required".to_string())
        } else if !is_valid_email(email, self.config.email_max_len) {
            Some("Please enter a valid email address".to_string())
        } else if self.config.suspicious_email_patterns.is_match(email) {
            Some("Please use a permanent email address".to_string())
        } else {
            None
        }
    }
}

fn check_length(field: FormField, value: &str, min: usize, max: usize) -> Option<String> {
    let len = value.chars().count();
    if len < min {
        Some(format!("{} must be at least {} characters", field.label(), min))
    } else if len > max {
        Some(format!("{} must be less than {} characters", field.label(), max))
    } else {
        None
    }
}
