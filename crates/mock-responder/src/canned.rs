//! Keyword-matched canned replies.

use widget_core::{async_trait, ChatReply, ChatRequest, Responder, WidgetError};

/// Default reply when no keyword matches.
const DEFAULT_REPLY: &str = "Thanks for reaching out! Use the buttons below to \
volunteer, donate, or get in touch, and a member of our team will follow up soon.";

/// A responder that answers from a fixed keyword table.
///
/// This is the reply set a bot uses before it has a trained model, and the
/// degraded-mode path when the backend is unreachable. Matching is
/// case-insensitive substring search over the visitor's text, first hit
/// wins, in table order.
pub struct CannedResponder {
    organization: String,
    table: Vec<(&'static [&'static str], &'static str)>,
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl CannedResponder {
    /// Create a canned responder with generic organization copy.
    pub fn new() -> Self {
        Self::for_organization("our organization")
    }

    /// Create a canned responder that mentions the organization by name.
    pub fn for_organization(name: impl Into<String>) -> Self {
        Self {
            organization: name.into(),
            table: vec![
                (
                    &["volunteer", "help out", "sign up"],
                    "We'd love your help! Tap the Volunteer button below and tell \
                     us which days work for you - it only takes a minute.",
                ),
                (
                    &["donate", "donation", "give", "contribute"],
                    "Every gift counts! Tap one of the donation amounts below, or \
                     ask us about other ways to give.",
                ),
                (
                    &["contact", "email", "reach", "talk to"],
                    "You can reach us through the Contact button below and we'll \
                     get back to you as soon as we can.",
                ),
                (
                    &["hours", "open", "when are you"],
                    "Our team usually replies within one business day. Leave a \
                     message through the Contact button and we'll follow up.",
                ),
                (
                    &["thank", "thanks"],
                    "You're very welcome! Is there anything else we can help with?",
                ),
            ],
        }
    }

    fn pick_reply(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        for (keywords, reply) in &self.table {
            if keywords.iter().any(|k| lowered.contains(k)) {
                return (*reply).to_string();
            }
        }
        format!(
            "{} Meanwhile, thanks for your interest in {}!",
            DEFAULT_REPLY, self.organization
        )
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, WidgetError> {
        Ok(ChatReply::new(self.pick_reply(&request.text)))
    }

    fn name(&self) -> &str {
        "CannedResponder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn reply_to(text: &str) -> String {
        let responder = CannedResponder::new();
        responder
            .respond(ChatRequest::new("bot-1", "s-1", text))
            .await
            .unwrap()
            .text
    }

    #[tokio::test]
    async fn test_volunteer_keyword() {
        let reply = reply_to("How can I volunteer with you?").await;
        assert!(reply.contains("Volunteer button"));
    }

    #[tokio::test]
    async fn test_donation_keyword_case_insensitive() {
        let reply = reply_to("I want to DONATE").await;
        assert!(reply.contains("donation amounts"));
    }

    #[tokio::test]
    async fn test_unmatched_text_gets_default() {
        let reply = reply_to("zzz unrelated").await;
        assert!(reply.contains("Thanks for reaching out"));
    }

    #[tokio::test]
    async fn test_organization_name_in_default() {
        let responder = CannedResponder::for_organization("River Cleanup");
        let reply = responder
            .respond(ChatRequest::new("bot-1", "s-1", "hm"))
            .await
            .unwrap();
        assert!(reply.text.contains("River Cleanup"));
    }

    #[tokio::test]
    async fn test_responder_name() {
        assert_eq!(CannedResponder::new().name(), "CannedResponder");
    }
}
