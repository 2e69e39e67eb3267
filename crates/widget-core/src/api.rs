//! The network gateway trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::bot_data::BotData;
use crate::error::WidgetError;
use crate::forms::{ContactForm, SubmitOutcome, VolunteerForm};

/// Backend contract for the widget.
///
/// Implementations resolve with parsed payloads on success and a typed
/// [`WidgetError`] on HTTP error status or transport failure. They never
/// panic and never surface UI-visible errors themselves; converting a
/// failure into fallback UX is the caller's job.
///
/// Policy expected of implementations: single attempt per interactive call
/// (no retries - the UI degrades gracefully) and a bounded request timeout
/// so a hung request cannot stall the caller indefinitely.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Fetch the bot's behavior data. `GET {apiUrl}/chatbot/{botId}`.
    async fn fetch_bot_data(&self, bot_id: &str) -> Result<BotData, WidgetError>;

    /// Request an AI chat reply. `POST {apiUrl}/chat`.
    ///
    /// Returns the reply text; an absent or empty `response` field is a
    /// [`WidgetError::Decode`].
    async fn send_chat(
        &self,
        bot_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<String, WidgetError>;

    /// Submit the volunteer signup form. `POST {apiUrl}/volunteer`.
    async fn submit_volunteer(
        &self,
        bot_id: &str,
        form: &VolunteerForm,
    ) -> Result<SubmitOutcome, WidgetError>;

    /// Submit the contact form. `POST {apiUrl}/contact`.
    async fn submit_contact(
        &self,
        bot_id: &str,
        form: &ContactForm,
    ) -> Result<SubmitOutcome, WidgetError>;

    /// Post one analytics event. `POST {apiUrl}/track`.
    ///
    /// Fire-and-forget on the wire: there is no response contract, and
    /// callers are expected to swallow any error this returns.
    async fn track(&self, event: &str, data: Value) -> Result<(), WidgetError>;
}
