//! Collaborator Traits
//!
//! Interfaces for the outside world. Implementations live in the
//! infrastructure layer (or in tests).

use platform::rate_limit::RateLimitRecord;
use platform::storage::StorageError;

use crate::domain::entities::EmailPayload;
use crate::domain::value_objects::{EmailCredentials, SendReceipt, Toast};
use crate::error::ContactResult;

/// Transactional email service
#[trait_variant::make(EmailSender: Send)]
pub trait LocalEmailSender {
    /// Send one message built from the template parameters
    async fn send(
        &self,
        credentials: &EmailCredentials,
        payload: &EmailPayload,
    ) -> ContactResult<SendReceipt>;
}

/// Persistence for the rate-limit record
pub trait RateLimitRepository {
    /// Load the stored record, `None` when nothing is stored
    fn load(&self) -> Result<Option<RateLimitRecord>, StorageError>;

    fn save(&self, record: &RateLimitRecord) -> Result<(), StorageError>;
}

/// Toast / notification surface
pub trait Notifier {
    fn notify(&self, toast: &Toast);
}
