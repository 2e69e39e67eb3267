//! RemoteResponder - the AI chat path over the gateway.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use widget_core::{BotApi, ChatReply, ChatRequest, Responder, WidgetError};

/// Responder for bots with a trained AI model.
///
/// Forwards each visitor message to `POST /chat` through the gateway.
/// Failures (network, HTTP status, missing or blank reply) surface as
/// errors; the state machine converts them into the apology message.
pub struct RemoteResponder {
    api: Arc<dyn BotApi>,
}

impl RemoteResponder {
    /// Create a responder over the given gateway.
    pub fn new(api: Arc<dyn BotApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, WidgetError> {
        debug!("forwarding chat message to backend: {} chars", request.text.len());

        let text = self
            .api
            .send_chat(&request.bot_id, &request.session_id, &request.text)
            .await?;

        // The BotApi contract does not guarantee a non-empty reply; a blank
        // one is a responder failure, not something to show the visitor.
        if text.trim().is_empty() {
            return Err(WidgetError::ResponderFailed(
                "backend returned an empty reply".to_string(),
            ));
        }

        Ok(ChatReply::new(text))
    }

    fn name(&self) -> &str {
        "RemoteResponder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use widget_core::{BotData, ContactForm, SubmitOutcome, VolunteerForm};

    struct ScriptedApi {
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl BotApi for ScriptedApi {
        async fn fetch_bot_data(&self, _bot_id: &str) -> Result<BotData, WidgetError> {
            Ok(BotData::fallback())
        }

        async fn send_chat(
            &self,
            _bot_id: &str,
            _session_id: &str,
            _message: &str,
        ) -> Result<String, WidgetError> {
            self.reply
                .clone()
                .map_err(|_| WidgetError::Network("scripted failure".to_string()))
        }

        async fn submit_volunteer(
            &self,
            _bot_id: &str,
            _form: &VolunteerForm,
        ) -> Result<SubmitOutcome, WidgetError> {
            Ok(SubmitOutcome::accepted())
        }

        async fn submit_contact(
            &self,
            _bot_id: &str,
            _form: &ContactForm,
        ) -> Result<SubmitOutcome, WidgetError> {
            Ok(SubmitOutcome::accepted())
        }

        async fn track(&self, _event: &str, _data: Value) -> Result<(), WidgetError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_reply_passthrough() {
        let responder = RemoteResponder::new(Arc::new(ScriptedApi {
            reply: Ok("We meet Saturdays at 9am.".to_string()),
        }));

        let reply = responder
            .respond(ChatRequest::new("bot-1", "s-1", "when do you meet?"))
            .await
            .unwrap();
        assert_eq!(reply.text, "We meet Saturdays at 9am.");
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let responder = RemoteResponder::new(Arc::new(ScriptedApi { reply: Err(()) }));

        let result = responder
            .respond(ChatRequest::new("bot-1", "s-1", "hello"))
            .await;
        assert!(matches!(result, Err(WidgetError::Network(_))));
    }

    #[tokio::test]
    async fn test_empty_reply_is_a_responder_failure() {
        let responder = RemoteResponder::new(Arc::new(ScriptedApi {
            reply: Ok("   ".to_string()),
        }));

        let result = responder
            .respond(ChatRequest::new("bot-1", "s-1", "hello"))
            .await;
        assert!(matches!(result, Err(WidgetError::ResponderFailed(_))));
    }

    #[tokio::test]
    async fn test_responder_name() {
        let responder = RemoteResponder::new(Arc::new(ScriptedApi { reply: Err(()) }));
        assert_eq!(responder.name(), "RemoteResponder");
    }
}
