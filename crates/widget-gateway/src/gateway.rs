//! HttpGateway implementation of the BotApi trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use widget_core::{BotApi, BotData, ContactForm, SubmitOutcome, VolunteerForm, WidgetError};

use crate::config::GatewayConfig;
use crate::wire::{
    ChatRequestBody, ChatResponseBody, ContactRequestBody, SubmitResponseBody, TrackRequestBody,
    VolunteerRequestBody,
};

/// Production gateway speaking the widget backend JSON contracts.
///
/// Every call is a single attempt with a bounded timeout. Failures come
/// back as typed [`WidgetError`]s; this type never panics and never
/// decides fallback UX on its own.
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, WidgetError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                WidgetError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        debug!(
            "HttpGateway initialized: api_url={}, timeout={:?}",
            config.api_url, config.request_timeout
        );

        Ok(Self { client, config })
    }

    /// Create a gateway from environment variables.
    ///
    /// See [`GatewayConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, WidgetError> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, WidgetError> {
        let url = self.url(path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| WidgetError::Network(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WidgetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WidgetError::Decode(format!("POST {}: {}", url, e)))
    }
}

#[async_trait]
impl BotApi for HttpGateway {
    async fn fetch_bot_data(&self, bot_id: &str) -> Result<BotData, WidgetError> {
        let url = self.url(&format!("/chatbot/{}", bot_id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WidgetError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("bot data fetch returned {}: {}", status, message);
            return Err(WidgetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WidgetError::Decode(format!("GET {}: {}", url, e)))
    }

    async fn send_chat(
        &self,
        bot_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<String, WidgetError> {
        let body = ChatRequestBody {
            bot_id: bot_id.to_string(),
            message: message.to_string(),
            session_id: session_id.to_string(),
        };

        let reply: ChatResponseBody = self.post_json("/chat", &body).await?;

        match reply.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(WidgetError::Decode(
                "chat response missing 'response' field".to_string(),
            )),
        }
    }

    async fn submit_volunteer(
        &self,
        bot_id: &str,
        form: &VolunteerForm,
    ) -> Result<SubmitOutcome, WidgetError> {
        let body = VolunteerRequestBody::new(bot_id, form);
        let reply: SubmitResponseBody = self.post_json("/volunteer", &body).await?;
        Ok(reply.into())
    }

    async fn submit_contact(
        &self,
        bot_id: &str,
        form: &ContactForm,
    ) -> Result<SubmitOutcome, WidgetError> {
        let body = ContactRequestBody::new(bot_id, form);
        let reply: SubmitResponseBody = self.post_json("/contact", &body).await?;
        Ok(reply.into())
    }

    async fn track(&self, event: &str, data: Value) -> Result<(), WidgetError> {
        let body = TrackRequestBody {
            event: event.to_string(),
            data,
        };
        let url = self.url("/track");

        // No response contract; only the status matters.
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WidgetError::Network(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Api {
                status: status.as_u16(),
                message: String::new(),
            });
        }

        Ok(())
    }
}
