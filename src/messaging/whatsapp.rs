// messaging/whatsapp.rs
use reqwest::Client;
use serde_json::json;
use thiserror::Error;

use crate::config::WhatsAppConfig;
use crate::utils::phone::normalize_phone;

#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("WhatsApp API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppClient {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Sends a plain text message and returns the provider message id.
    /// The recipient is reduced to bare digits before the call.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<String, MessagingError> {
        let url = format!(
            "{}/{}/messages",
            self.config.api_base_url, self.config.phone_number_id
        );

        let payload = json!({
            "messaging_product": "whatsapp",
            "to": normalize_phone(to),
            "type": "text",
            "text": { "body": body }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "No response body".to_string());

        if !status.is_success() {
            tracing::error!(
                "WhatsApp message to {} failed ({}): {}",
                to,
                status.as_u16(),
                response_text
            );
            return Err(MessagingError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        // Success responses carry the id under messages[0].id
        let message_id = serde_json::from_str::<serde_json::Value>(&response_text)
            .ok()
            .and_then(|body| body["messages"][0]["id"].as_str().map(|id| id.to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        tracing::info!("WhatsApp message sent to {} (id: {})", to, message_id);
        Ok(message_id)
    }
}
