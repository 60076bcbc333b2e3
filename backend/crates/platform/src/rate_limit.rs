//! Rate Limiting Infrastructure
//!
//! Two-tier limiter used by the contact form: a short burst window caps the
//! number of attempts, and a longer cooldown keeps the sender locked out
//! once the cap is hit. The two are evaluated independently, so a window
//! reset may happen before a cooldown that began in an earlier window ends.
//!
//! Evaluation is pure: the caller loads the record, calls [`evaluate`] and
//! persists whatever it returns.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Milliseconds per minute, used to report remaining cooldown
const MINUTE_MS: i64 = 60_000;

/// Rate limit policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Maximum attempts allowed in one window
    pub max_attempts: u32,
    /// Burst window duration
    pub window: Duration,
    /// Lockout duration once `max_attempts` is reached
    pub cooldown: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window: Duration::from_secs(60),
            cooldown: Duration::from_secs(300),
        }
    }
}

impl RateLimitPolicy {
    pub fn new(max_attempts: u32, window: Duration, cooldown: Duration) -> Self {
        Self {
            max_attempts,
            window,
            cooldown,
        }
    }

    pub fn window_ms(&self) -> i64 {
        duration_ms(self.window)
    }

    pub fn cooldown_ms(&self) -> i64 {
        duration_ms(self.cooldown)
    }
}

fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Persisted attempt counter
///
/// Serialized as `{"count": n, "timestamp": ms}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    #[serde(rename = "count")]
    pub attempt_count: u32,
    #[serde(rename = "timestamp")]
    pub window_start_ms: i64,
}

impl RateLimitRecord {
    pub fn new(attempt_count: u32, window_start_ms: i64) -> Self {
        Self {
            attempt_count,
            window_start_ms,
        }
    }

    /// Record used when nothing is stored (or the store is unreadable)
    pub fn fresh(now_ms: i64) -> Self {
        Self::new(0, now_ms)
    }

    /// Time since the window opened, saturating at the `i64` bounds
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.window_start_ms)
    }

    /// Window opened after `now_ms` (clock moved back or record tampered)
    pub fn starts_after(&self, now_ms: i64) -> bool {
        self.window_start_ms > now_ms
    }
}

/// Outcome of one rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Attempt may proceed
    Allowed,
    /// Cap reached and cooldown still running
    CoolingDown { remaining_minutes: i64 },
    /// Cap reached inside the burst window
    WindowExhausted,
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub decision: RateLimitDecision,
    /// Record to persist; `None` means the stored record stays as is
    pub next_record: Option<RateLimitRecord>,
}

/// Evaluate one attempt against the stored record
///
/// ## Arguments
/// * `policy` - thresholds
/// * `record` - currently stored record
/// * `now_ms` - current time in epoch milliseconds
pub fn evaluate(policy: &RateLimitPolicy, record: RateLimitRecord, now_ms: i64) -> RateLimitResult {
    if record.starts_after(now_ms) {
        return RateLimitResult {
            decision: RateLimitDecision::Allowed,
            next_record: Some(RateLimitRecord::new(1, now_ms)),
        };
    }

    let elapsed = record.elapsed_ms(now_ms);
    let exhausted = record.attempt_count >= policy.max_attempts;

    if exhausted && elapsed < policy.cooldown_ms() {
        let remaining_ms = (policy.cooldown_ms() - elapsed).unsigned_abs();
        let remaining_minutes = remaining_ms.div_ceil(MINUTE_MS.unsigned_abs());
        return RateLimitResult {
            decision: RateLimitDecision::CoolingDown {
                remaining_minutes: i64::try_from(remaining_minutes).unwrap_or(i64::MAX),
            },
            next_record: None,
        };
    }

    if elapsed < policy.window_ms() {
        let next = RateLimitRecord::new(record.attempt_count.saturating_add(1), record.window_start_ms);
        let decision = if exhausted {
            RateLimitDecision::WindowExhausted
        } else {
            RateLimitDecision::Allowed
        };
        return RateLimitResult {
            decision,
            next_record: Some(next),
        };
    }

    RateLimitResult {
        decision: RateLimitDecision::Allowed,
        next_record: Some(RateLimitRecord::new(1, now_ms)),
    }
}
