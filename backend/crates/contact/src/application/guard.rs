//! Submission Guard
//!
//! Orchestrates one contact form submit:
//! debounce → rate limit → credentials → honeypot → validation → send.
//! Every outcome is reported to the notifier; nothing escapes as an error.

use std::sync::Arc;

use kernel::id::SubmissionId;
use platform::client::ClientMetadata;
use tracing::Instrument;

use crate::application::config::{EmailServiceConfig, GuardConfig};
use crate::application::rate_limit::CheckRateLimitUseCase;
use crate::application::status::FormStatus;
use crate::application::validate::ValidateSubmissionUseCase;
use crate::domain::entities::{ContactForm, SanitizedFields, SubmissionAttempt};
use crate::domain::repository::{EmailSender, Notifier, RateLimitRepository};
use crate::domain::services::check_honeypot;
use crate::domain::value_objects::{FieldErrors, SendReceipt, Toast};
use crate::error::{ContactError, ContactResult};

const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
const BOT_MESSAGE: &str = "Message sent successfully!";

/// Terminal state of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Too soon after the previous accepted submit
    Debounced,
    /// Rejected by the burst window (`None`) or the cooldown
    RateLimited { remaining_minutes: Option<i64> },
    /// Email service identifiers absent
    ConfigMissing,
    /// Honeypot filled: reported as success, nothing sent
    BotSilentSuccess,
    ValidationFailed(FieldErrors),
    SuspiciousInput,
    Sent,
    SendFailed,
}

impl SubmissionOutcome {
    /// Whether the user was shown a success message
    pub fn appears_successful(&self) -> bool {
        matches!(self, SubmissionOutcome::Sent | SubmissionOutcome::BotSilentSuccess)
    }
}

impl From<ContactError> for SubmissionOutcome {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Debounced => SubmissionOutcome::Debounced,
            ContactError::CoolingDown { remaining_minutes } => SubmissionOutcome::RateLimited {
                remaining_minutes: Some(remaining_minutes),
            },
            ContactError::RateLimited => SubmissionOutcome::RateLimited {
                remaining_minutes: None,
            },
            ContactError::MissingConfiguration(_) => SubmissionOutcome::ConfigMissing,
            ContactError::InvalidFields(errors) => SubmissionOutcome::ValidationFailed(errors),
            ContactError::SuspiciousInput(_) => SubmissionOutcome::SuspiciousInput,
            ContactError::Transport { .. } | ContactError::Timeout(_) => {
                SubmissionOutcome::SendFailed
            }
        }
    }
}

/// Accepted path of a submission
enum Accepted {
    Sent(SendReceipt),
    Bot,
}

/// Guard for one contact form instance
pub struct SubmissionGuard<E, R, N>
where
    E: EmailSender,
    R: RateLimitRepository,
    N: Notifier,
{
    config: Arc<GuardConfig>,
    email_config: EmailServiceConfig,
    sender: Arc<E>,
    notifier: Arc<N>,
    rate_limiter: CheckRateLimitUseCase<R>,
    validator: ValidateSubmissionUseCase,
    status: Arc<FormStatus>,
    client: ClientMetadata,
    errors: FieldErrors,
    last_accepted_ms: Option<i64>,
}

impl<E, R, N> SubmissionGuard<E, R, N>
where
    E: EmailSender,
    R: RateLimitRepository,
    N: Notifier,
{
    pub fn new(
        config: Arc<GuardConfig>,
        email_config: EmailServiceConfig,
        sender: Arc<E>,
        rate_limit_repo: Arc<R>,
        notifier: Arc<N>,
    ) -> Self {
        let status = Arc::new(FormStatus::new());
        Self {
            rate_limiter: CheckRateLimitUseCase::new(
                rate_limit_repo,
                Arc::clone(&config),
                Arc::clone(&status),
            ),
            validator: ValidateSubmissionUseCase::new(Arc::clone(&config)),
            config,
            email_config,
            sender,
            notifier,
            status,
            client: ClientMetadata::default(),
            errors: FieldErrors::new(),
            last_accepted_ms: None,
        }
    }

    /// Attach metadata about the submitting client
    pub fn with_client(mut self, client: ClientMetadata) -> Self {
        self.client = client;
        self
    }

    /// Shared flags for disabling the submit control
    pub fn status(&self) -> Arc<FormStatus> {
        Arc::clone(&self.status)
    }

    /// Inline field errors from the latest validation
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Count an attempt and report whether it may proceed
    pub fn check_rate_limit(&self, now_ms: i64) -> bool {
        self.rate_limiter.check(now_ms).is_ok()
    }

    /// `true` for a human (empty honeypot)
    pub fn check_honeypot(&self, form: &ContactForm) -> bool {
        check_honeypot(form)
    }

    /// Validate without side effects on the guard state
    pub fn validate(&self, form: &ContactForm) -> ContactResult<SanitizedFields> {
        self.validator.validate(form)
    }

    /// Run one submission and report the outcome
    ///
    /// On success (real or bot) the form is reset.
    pub async fn submit(&mut self, form: &mut ContactForm, now_ms: i64) -> SubmissionOutcome {
        let submission_id = SubmissionId::new();
        let span = tracing::info_span!("contact_submit", submission_id = %submission_id);
        self.run(form, now_ms, submission_id).instrument(span).await
    }

    async fn run(
        &mut self,
        form: &mut ContactForm,
        now_ms: i64,
        submission_id: SubmissionId,
    ) -> SubmissionOutcome {
        match self.process(form, now_ms, submission_id).await {
            Ok(Accepted::Sent(receipt)) => {
                tracing::info!(status = receipt.status, "Email sent successfully");
                self.errors.clear();
                form.reset();
                self.notifier.notify(
                    &Toast::success(SENT_MESSAGE).with_description(self.config.response_note.clone()),
                );
                SubmissionOutcome::Sent
            }
            Ok(Accepted::Bot) => {
                tracing::warn!("Bot detected via honeypot");
                form.reset();
                self.notifier.notify(&Toast::success(BOT_MESSAGE));
                SubmissionOutcome::BotSilentSuccess
            }
            Err(err) => {
                err.log();
                let app_err = err.to_app_error(&self.config.fallback_contact);
                self.notifier.notify(&Toast::from(&app_err));
                SubmissionOutcome::from(err)
            }
        }
    }

    async fn process(
        &mut self,
        form: &ContactForm,
        now_ms: i64,
        submission_id: SubmissionId,
    ) -> ContactResult<Accepted> {
        self.debounce(now_ms)?;
        self.rate_limiter.check(now_ms)?;
        let credentials = self.email_config.credentials()?;

        if !check_honeypot(form) {
            return Ok(Accepted::Bot);
        }

        let fields = match self.validator.validate(form) {
            Ok(fields) => {
                self.errors.clear();
                fields
            }
            Err(ContactError::InvalidFields(errors)) => {
                self.errors = errors.clone();
                return Err(ContactError::InvalidFields(errors));
            }
            Err(err) => return Err(err),
        };

        let attempt = SubmissionAttempt::new(submission_id, fields, now_ms, self.client.clone());
        let payload = attempt.to_payload(self.config.max_user_agent_len);

        self.status.set_submitting(true);
        let sent = tokio::time::timeout(
            self.config.send_timeout,
            self.sender.send(&credentials, &payload),
        )
        .await;
        self.status.set_submitting(false);

        match sent {
            Ok(result) => result.map(Accepted::Sent),
            Err(_) => Err(ContactError::Timeout(self.config.send_timeout)),
        }
    }

    fn debounce(&mut self, now_ms: i64) -> ContactResult<()> {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.config.debounce_ms() {
                return Err(ContactError::Debounced);
            }
        }
        self.last_accepted_ms = Some(now_ms);
        Ok(())
    }
}
