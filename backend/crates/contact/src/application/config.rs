//! Application Configuration
//!
//! Guard thresholds and the email service identifiers.

use std::env;
use std::time::Duration;

pub use platform::rate_limit::RateLimitPolicy;

use crate::domain::patterns::PatternSet;
use crate::domain::value_objects::EmailCredentials;
use crate::error::{ContactError, ContactResult};

/// Storage key holding the rate-limit record
pub const RATE_LIMIT_STORAGE_KEY: &str = "contact_form_attempts";

/// Environment variables
pub const ENV_SERVICE_ID: &str = "EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "EMAILJS_PUBLIC_KEY";
pub const ENV_FALLBACK_CONTACT: &str = "CONTACT_FALLBACK_EMAIL";

const DEFAULT_FALLBACK_CONTACT: &str = "hello@example.com";

/// Guard configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Burst window and cooldown
    pub rate_limit: RateLimitPolicy,
    /// Minimum gap between two accepted submits
    pub debounce: Duration,
    pub name_min_len: usize,
    pub name_max_len: usize,
    pub email_max_len: usize,
    pub subject_min_len: usize,
    pub subject_max_len: usize,
    pub message_min_len: usize,
    pub message_max_len: usize,
    /// Client agent string is cut to this many characters
    pub max_user_agent_len: usize,
    pub storage_key: String,
    /// Address offered when the form cannot deliver
    pub fallback_contact: String,
    /// Shown under the success toast
    pub response_note: String,
    /// Upper bound on one send call
    pub send_timeout: Duration,
    pub sql_patterns: PatternSet,
    pub spam_patterns: PatternSet,
    pub suspicious_email_patterns: PatternSet,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitPolicy::default(),
            debounce: Duration::from_millis(2000),
            name_min_len: 2,
            name_max_len: 50,
            email_max_len: 100,
            subject_min_len: 3,
            subject_max_len: 150,
            message_min_len: 10,
            message_max_len: 2000,
            max_user_agent_len: 100,
            storage_key: RATE_LIMIT_STORAGE_KEY.to_string(),
            fallback_contact: DEFAULT_FALLBACK_CONTACT.to_string(),
            response_note: "Usually responds within 24 hours".to_string(),
            send_timeout: Duration::from_secs(15),
            sql_patterns: PatternSet::sql_injection(),
            spam_patterns: PatternSet::spam(),
            suspicious_email_patterns: PatternSet::suspicious_email(),
        }
    }
}

impl GuardConfig {
    /// Defaults, with the fallback address taken from the environment if set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(fallback) = non_empty(lookup(ENV_FALLBACK_CONTACT)) {
            config.fallback_contact = fallback;
        }
        config
    }

    pub fn debounce_ms(&self) -> i64 {
        i64::try_from(self.debounce.as_millis()).unwrap_or(i64::MAX)
    }
}

/// EmailJS identifiers as supplied by deployment configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailServiceConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

impl EmailServiceConfig {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: Some(service_id.into()),
            template_id: Some(template_id.into()),
            public_key: Some(public_key.into()),
        }
    }

    /// Read `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID` and `EMAILJS_PUBLIC_KEY`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Empty values count as absent
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_id: non_empty(lookup(ENV_SERVICE_ID)),
            template_id: non_empty(lookup(ENV_TEMPLATE_ID)),
            public_key: non_empty(lookup(ENV_PUBLIC_KEY)),
        }
    }

    /// All three identifiers, or the names of the missing ones
    pub fn credentials(&self) -> ContactResult<EmailCredentials> {
        match (&self.service_id, &self.template_id, &self.public_key) {
            (Some(service_id), Some(template_id), Some(public_key)) => Ok(EmailCredentials {
                service_id: service_id.clone(),
                template_id: template_id.clone(),
                public_key: public_key.clone(),
            }),
            _ => {
                let missing = [
                    (ENV_SERVICE_ID, self.service_id.is_none()),
                    (ENV_TEMPLATE_ID, self.template_id.is_none()),
                    (ENV_PUBLIC_KEY, self.public_key.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(ContactError::MissingConfiguration(missing))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.rate_limit.max_attempts, 3);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.rate_limit.cooldown, Duration::from_secs(300));
        assert_eq!(config.debounce_ms(), 2000);
        assert_eq!(config.storage_key, "contact_form_attempts");
        assert_eq!(config.max_user_agent_len, 100);
        assert_eq!(config.sql_patterns.len(), 3);
        assert_eq!(config.spam_patterns.len(), 4);
        assert_eq!(config.suspicious_email_patterns.len(), 2);
    }

    #[test]
    fn test_fallback_from_lookup() {
        let env: HashMap<&str, &str> = [(ENV_FALLBACK_CONTACT, "me@site.dev")].into();
        let config = GuardConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.fallback_contact, "me@site.dev");

        let config = GuardConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.fallback_contact, DEFAULT_FALLBACK_CONTACT);
    }

    #[test]
    fn test_email_config_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_SERVICE_ID, "service_1"),
            (ENV_TEMPLATE_ID, ""),
            (ENV_PUBLIC_KEY, "pk"),
        ]
        .into();
        let config = EmailServiceConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.service_id.as_deref(), Some("service_1"));
        assert!(config.template_id.is_none());

        match config.credentials() {
            Err(ContactError::MissingConfiguration(missing)) => {
                assert_eq!(missing, vec![ENV_TEMPLATE_ID]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_credentials_present() {
        let creds = EmailServiceConfig::new("s", "t", "k").credentials().unwrap();
        assert_eq!(creds.service_id, "s");
        assert_eq!(creds.template_id, "t");
        assert_eq!(creds.public_key, "k");
        assert!(!format!("{creds:?}").contains("\"k\""));
    }
}
