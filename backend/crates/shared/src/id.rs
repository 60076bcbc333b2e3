//! Submission correlation id
//!
//! Every submit gets a fresh [`SubmissionId`] that is attached to its
//! tracing span, so the events of one attempt can be grouped in logs.

use std::fmt;
use uuid::Uuid;

/// Random (UUID v4) id of one submission attempt
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubmissionId({})", self.0)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = SubmissionId::new();
        let b = SubmissionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_is_plain_uuid() {
        let id = SubmissionId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
        assert_eq!(id.to_string().len(), 36);
        assert!(format!("{id:?}").starts_with("SubmissionId("));
    }

    #[test]
    fn test_copy_keeps_identity() {
        let id = SubmissionId::new();
        let copy = id;
        assert_eq!(copy, id);
    }
}
