//! HTTP email provider client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use edvise_core::config::MailConfig;
use edvise_core::{Error, Result};

const SERVICE: &str = "email provider";

/// A structured outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text body, when the template provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Delivery contract the submission flows are written against.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `message`, returning the provider's message id.
    async fn send(&self, message: &EmailMessage) -> Result<String>;
}

/// Client for the provider's send endpoint.
#[derive(Debug, Clone)]
pub struct MailClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

impl MailClient {
    /// Create a client from mail settings.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl Mailer for MailClient {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        if message.to.is_empty() {
            return Err(Error::validation("no recipients configured"));
        }
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Email transport failure"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message_text = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status.to_string()
                    } else {
                        body
                    }
                });
            tracing::warn!(error = %message_text, "Email rejected by provider");
            return Err(Error::remote(SERVICE, message_text));
        }

        let ack: SendResponse = response.json().await?;
        tracing::info!(message_id = %ack.id, subject = %message.subject, "Email delivered");
        Ok(ack.id)
    }
}
