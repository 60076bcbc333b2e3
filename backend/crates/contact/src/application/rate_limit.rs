//! Check Rate Limit Use Case

use std::sync::Arc;

use platform::rate_limit::{RateLimitDecision, RateLimitRecord, evaluate};

use crate::application::config::GuardConfig;
use crate::application::status::FormStatus;
use crate::domain::repository::RateLimitRepository;
use crate::error::{ContactError, ContactResult};

/// Check Rate Limit Use Case
pub struct CheckRateLimitUseCase<R>
where
    R: RateLimitRepository,
{
    rate_limit_repo: Arc<R>,
    config: Arc<GuardConfig>,
    status: Arc<FormStatus>,
}

impl<R> CheckRateLimitUseCase<R>
where
    R: RateLimitRepository,
{
    pub fn new(rate_limit_repo: Arc<R>, config: Arc<GuardConfig>, status: Arc<FormStatus>) -> Self {
        Self {
            rate_limit_repo,
            config,
            status,
        }
    }

    /// Count one attempt at `now_ms` and decide whether it may proceed
    ///
    /// Storage failures never reject: an unreadable record behaves like a
    /// fresh window and a failed write is dropped.
    pub fn check(&self, now_ms: i64) -> ContactResult<()> {
        let record = match self.rate_limit_repo.load() {
            Ok(Some(record)) => record,
            Ok(None) => RateLimitRecord::fresh(now_ms),
            Err(e) => {
                tracing::debug!(error = %e, "Rate limit record unreadable, starting fresh window");
                RateLimitRecord::fresh(now_ms)
            }
        };

        let result = evaluate(&self.config.rate_limit, record, now_ms);

        if let Some(next) = result.next_record {
            if let Err(e) = self.rate_limit_repo.save(&next) {
                tracing::debug!(error = %e, "Rate limit record not persisted");
            }
        }

        match result.decision {
            RateLimitDecision::Allowed => {
                self.status.set_blocked(false);
                Ok(())
            }
            RateLimitDecision::CoolingDown { remaining_minutes } => {
                self.status.set_blocked(true);
                Err(ContactError::CoolingDown { remaining_minutes })
            }
            RateLimitDecision::WindowExhausted => Err(ContactError::RateLimited),
        }
    }
}
