//! Form Status
//!
//! Flags the UI reads to disable the submit control.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shared, observable form flags
#[derive(Debug, Default)]
pub struct FormStatus {
    submitting: AtomicBool,
    blocked: AtomicBool,
}

impl FormStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A send is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Locked out by the rate-limit cooldown
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Acquire)
    }

    /// Submit control should be disabled
    pub fn is_disabled(&self) -> bool {
        self.is_submitting() || self.is_blocked()
    }

    pub(crate) fn set_submitting(&self, value: bool) {
        self.submitting.store(value, Ordering::Release);
    }

    pub(crate) fn set_blocked(&self, value: bool) {
        self.blocked.store(value, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let status = FormStatus::new();
        assert!(!status.is_disabled());

        status.set_blocked(true);
        assert!(status.is_blocked());
        assert!(status.is_disabled());

        status.set_blocked(false);
        status.set_submitting(true);
        assert!(status.is_disabled());
    }
}
