//! EmailJS REST client
//!
//! `POST {base}/api/v1.0/email/send` with the service, template and public
//! key identifiers plus the template parameters. EmailJS answers `200 OK`
//! with a short text body; anything else is a transport failure.

use serde::Serialize;

use crate::domain::entities::EmailPayload;
use crate::domain::repository::EmailSender;
use crate::domain::value_objects::{EmailCredentials, SendReceipt};
use crate::error::{ContactError, ContactResult};

/// Public EmailJS API origin
pub const EMAILJS_API_BASE: &str = "https://api.emailjs.com";

const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailPayload,
}

impl<'a> SendRequest<'a> {
    fn new(credentials: &'a EmailCredentials, payload: &'a EmailPayload) -> Self {
        Self {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: payload,
        }
    }
}

/// EmailJS-backed sender
#[derive(Debug, Clone)]
pub struct EmailJsSender {
    client: reqwest::Client,
    base_url: String,
}

impl Default for EmailJsSender {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl EmailJsSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: EMAILJS_API_BASE.to_string(),
        }
    }

    /// Point at another origin (proxy, self-hosted relay)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn send_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SEND_PATH)
    }
}

impl EmailSender for EmailJsSender {
    async fn send(
        &self,
        credentials: &EmailCredentials,
        payload: &EmailPayload,
    ) -> ContactResult<SendReceipt> {
        let response = self
            .client
            .post(self.send_url())
            .json(&SendRequest::new(credentials, payload))
            .send()
            .await
            .map_err(|e| ContactError::Transport {
                status: None,
                detail: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ContactError::Transport {
                status: Some(status.as_u16()),
                detail: text,
            });
        }

        Ok(SendReceipt {
            status: status.as_u16(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EmailPayload {
        EmailPayload {
            from_name: "Ada".into(),
            from_lastname: "Lovelace".into(),
            from_email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "A message long enough".into(),
            timestamp: "2024-01-01T00:00:00.000Z".into(),
            user_agent: "test-agent".into(),
        }
    }

    #[test]
    fn test_send_url() {
        let sender = EmailJsSender::default();
        assert_eq!(sender.send_url(), "https://api.emailjs.com/api/v1.0/email/send");

        let sender = EmailJsSender::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(sender.send_url(), "http://127.0.0.1:9000/api/v1.0/email/send");
    }

    #[test]
    fn test_request_body_shape() {
        let credentials = EmailCredentials {
            service_id: "service_a".into(),
            template_id: "template_b".into(),
            public_key: "pk_c".into(),
        };
        let payload = payload();
        let body = serde_json::to_value(SendRequest::new(&credentials, &payload)).unwrap();

        assert_eq!(body["service_id"], "service_a");
        assert_eq!(body["template_id"], "template_b");
        assert_eq!(body["user_id"], "pk_c");
        assert_eq!(body["template_params"]["from_name"], "Ada");
        assert_eq!(body["template_params"]["from_lastname"], "Lovelace");
        assert_eq!(body["template_params"]["user_agent"], "test-agent");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let credentials = EmailCredentials {
            service_id: "s".into(),
            template_id: "t".into(),
            public_key: "k".into(),
        };
        // Port 9 (discard) on localhost is expected to refuse connections.
        let sender = EmailJsSender::default().with_base_url("http://127.0.0.1:9");
        let result = sender.send(&credentials, &payload()).await;
        assert!(matches!(
            result,
            Err(ContactError::Transport { status: None, .. })
        ));
    }
}
