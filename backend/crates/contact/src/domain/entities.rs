//! Domain Entities
//!
//! The live contact form, the sanitized attempt built from it, and the
//! payload handed to the email service.

use chrono::{DateTime, SecondsFormat, Utc};
use kernel::id::SubmissionId;
use platform::client::ClientMetadata;
use serde::{Deserialize, Serialize};

use crate::domain::services::sanitize;
use crate::domain::value_objects::FormField;

/// Current values of the contact form
///
/// `website` is the honeypot: rendered off-screen, out of tab order and
/// hidden from assistive technology, so only bots fill it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub website: String,
}

impl ContactForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn honeypot(&self) -> &str {
        &self.website
    }

    /// Clear every field, honeypot included
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Form values after sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl SanitizedFields {
    pub fn from_form(form: &ContactForm) -> Self {
        Self {
            first_name: sanitize(&form.first_name),
            last_name: sanitize(&form.last_name),
            email: sanitize(&form.email),
            subject: sanitize(&form.subject),
            message: sanitize(&form.message),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    /// All five fields joined with single spaces
    pub fn joined(&self) -> String {
        FormField::ALL
            .iter()
            .map(|f| self.field(*f))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One submission that passed every check
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    pub id: SubmissionId,
    pub fields: SanitizedFields,
    pub timestamp_ms: i64,
    pub client: ClientMetadata,
}

impl SubmissionAttempt {
    pub fn new(
        id: SubmissionId,
        fields: SanitizedFields,
        timestamp_ms: i64,
        client: ClientMetadata,
    ) -> Self {
        Self {
            id,
            fields,
            timestamp_ms,
            client,
        }
    }

    /// Build the template parameters sent to the email service
    pub fn to_payload(&self, max_user_agent_len: usize) -> EmailPayload {
        EmailPayload {
            from_name: self.fields.first_name.clone(),
            from_lastname: self.fields.last_name.clone(),
            from_email: self.fields.email.clone(),
            subject: self.fields.subject.clone(),
            message: self.fields.message.clone(),
            timestamp: format_timestamp(self.timestamp_ms),
            user_agent: self.client.truncated_user_agent(max_user_agent_len),
        }
    }
}

/// Flat template parameter mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailPayload {
    pub from_name: String,
    pub from_lastname: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: String,
    pub user_agent: String,
}

/// RFC 3339 with milliseconds and a `Z` suffix
fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp_ms.to_string())
}
