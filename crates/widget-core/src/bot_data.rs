//! Server-supplied bot behavior data.

use serde::Deserialize;

/// Describes one chatbot's behavior and enabled features.
///
/// Fetched once from `GET {apiUrl}/chatbot/{botId}` at mount. If the fetch
/// fails the widget substitutes [`BotData::fallback`] so it stays fully
/// interactive with generic copy (degraded mode).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotData {
    /// Display name shown in the widget header.
    #[serde(default = "default_name")]
    pub name: String,

    /// First bot message, appended on the first open.
    #[serde(default = "default_welcome")]
    pub welcome_message: String,

    /// Whether the free-text chat input is shown.
    #[serde(default = "default_true")]
    pub chat_enabled: bool,

    /// Whether the email action button is shown.
    #[serde(default)]
    pub email_enabled: bool,

    /// Whether the phone action button is shown.
    #[serde(default)]
    pub phone_enabled: bool,

    /// Whether the volunteer signup form is offered.
    #[serde(default)]
    pub volunteer_enabled: bool,

    /// External volunteer signup page, if the org uses one.
    #[serde(default)]
    pub volunteer_url: Option<String>,

    /// Whether donation quick-replies are shown.
    #[serde(default)]
    pub donation_enabled: bool,

    /// Suggested donation amounts in whole dollars.
    #[serde(default = "default_donation_amounts")]
    pub donation_amounts: Vec<u32>,

    /// External donation page; without it, donation clicks stay in-chat.
    #[serde(default)]
    pub donation_url: Option<String>,

    /// Contact email for the contact form.
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Optional intro video URL.
    #[serde(default)]
    pub video: Option<String>,

    /// True when the bot has a trained AI model; otherwise canned replies.
    #[serde(default)]
    pub is_ai_trained: bool,

    /// Whether the "powered by" footer is shown.
    #[serde(default = "default_true")]
    pub show_branding: bool,
}

fn default_name() -> String {
    "Our Organization".to_string()
}

fn default_welcome() -> String {
    "Hi there! Thanks for stopping by. How can we help you today?".to_string()
}

fn default_true() -> bool {
    true
}

fn default_donation_amounts() -> Vec<u32> {
    vec![25, 50, 100, 250]
}

impl BotData {
    /// Complete hardcoded fallback used when the bot-data fetch fails.
    ///
    /// Chat stays enabled with canned replies so the visitor never sees a
    /// broken or empty widget.
    pub fn fallback() -> Self {
        Self {
            name: default_name(),
            welcome_message: default_welcome(),
            chat_enabled: true,
            email_enabled: false,
            phone_enabled: false,
            volunteer_enabled: true,
            volunteer_url: None,
            donation_enabled: true,
            donation_amounts: default_donation_amounts(),
            donation_url: None,
            email: None,
            phone: None,
            video: None,
            is_ai_trained: false,
            show_branding: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_interactive() {
        let data = BotData::fallback();
        assert!(data.chat_enabled);
        assert!(!data.is_ai_trained);
        assert!(!data.welcome_message.is_empty());
        assert_eq!(data.donation_amounts, vec![25, 50, 100, 250]);
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        // Backend may omit most fields; every one must default independently.
        let data: BotData = serde_json::from_str(r#"{"name": "River Cleanup"}"#).unwrap();
        assert_eq!(data.name, "River Cleanup");
        assert!(data.chat_enabled);
        assert!(data.show_branding);
        assert!(!data.is_ai_trained);
        assert!(data.volunteer_url.is_none());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let data: BotData = serde_json::from_str(
            r#"{
                "name": "Food Bank",
                "welcomeMessage": "Welcome!",
                "chatEnabled": false,
                "volunteerEnabled": true,
                "donationEnabled": true,
                "donationAmounts": [10, 20],
                "donationUrl": "https://donate.example.org",
                "isAiTrained": true,
                "showBranding": false
            }"#,
        )
        .unwrap();

        assert_eq!(data.welcome_message, "Welcome!");
        assert!(!data.chat_enabled);
        assert!(data.volunteer_enabled);
        assert_eq!(data.donation_amounts, vec![10, 20]);
        assert_eq!(data.donation_url.as_deref(), Some("https://donate.example.org"));
        assert!(data.is_ai_trained);
        assert!(!data.show_branding);
    }
}
