//! The responder trait - chat reply producers.

use async_trait::async_trait;

use crate::error::WidgetError;

/// One visitor chat turn, handed to a responder.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The chatbot this conversation belongs to.
    pub bot_id: String,
    /// Correlates every call from one visitor.
    pub session_id: String,
    /// What the visitor typed.
    pub text: String,
}

impl ChatRequest {
    /// Create a chat request.
    pub fn new(
        bot_id: impl Into<String>,
        session_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            bot_id: bot_id.into(),
            session_id: session_id.into(),
            text: text.into(),
        }
    }
}

/// A bot reply produced by a responder.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
}

impl ChatReply {
    /// Create a reply with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Produces bot replies to visitor messages.
///
/// Two families exist: canned responders (fixed copy, used when the bot has
/// no trained model or as the degraded-mode path) and remote responders
/// (the AI path over the chat endpoint). The state machine treats them
/// identically: on any `Err` it appends a fixed apology message and returns
/// to idle, so a responder failure can never strand the typing indicator.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce a reply for one visitor message.
    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, WidgetError>;

    /// Name of this responder, for logging.
    fn name(&self) -> &str;
}
