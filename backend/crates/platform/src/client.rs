//! Client metadata
//!
//! Information about the submitting client that travels with a message.

/// Metadata attached to an outgoing message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    /// Raw User-Agent string, if the host exposes one
    pub user_agent: Option<String>,
}

impl ClientMetadata {
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent }
    }

    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        Self::new(Some(user_agent.into()))
    }

    /// User-Agent cut to at most `max_chars` characters (empty if unknown)
    pub fn truncated_user_agent(&self, max_chars: usize) -> String {
        self.user_agent
            .as_deref()
            .map(|ua| truncate_chars(ua, max_chars))
            .unwrap_or_default()
    }
}

/// Truncate on a character boundary
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}
