//! Wire types for the widget backend JSON contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use widget_core::{ContactForm, SubmitOutcome, VolunteerForm};

/// `POST /chat` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    pub bot_id: String,
    pub message: String,
    pub session_id: String,
}

/// `POST /chat` response body.
#[derive(Debug, Deserialize)]
pub struct ChatResponseBody {
    /// The AI reply. Absent or empty means the backend had nothing to say;
    /// the caller substitutes the apology message.
    #[serde(default)]
    pub response: Option<String>,
}

/// `POST /volunteer` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerRequestBody {
    pub bot_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub available_days: Vec<String>,
}

impl VolunteerRequestBody {
    pub fn new(bot_id: &str, form: &VolunteerForm) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            available_days: form.available_days.clone(),
        }
    }
}

/// `POST /contact` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestBody {
    pub bot_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub recipient_email: String,
}

impl ContactRequestBody {
    pub fn new(bot_id: &str, form: &ContactForm) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
            recipient_email: form.recipient_email.clone(),
        }
    }
}

/// `POST /volunteer` and `POST /contact` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mailto_link: Option<String>,
}

impl From<SubmitResponseBody> for SubmitOutcome {
    fn from(body: SubmitResponseBody) -> Self {
        SubmitOutcome {
            success: body.success,
            message: body.message,
            mailto_link: body.mailto_link,
        }
    }
}

/// `POST /track` request body. No response contract.
#[derive(Debug, Serialize)]
pub struct TrackRequestBody {
    pub event: String,
    pub data: Value,
}
