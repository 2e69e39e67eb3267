//! Form payloads and submission outcomes.

use serde::Serialize;

/// Volunteer signup form fields, as entered by the visitor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub available_days: Vec<String>,
}

/// Contact form fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub recipient_email: String,
}

/// Backend verdict on a form submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// Whether the backend accepted the submission.
    pub success: bool,
    /// Optional human-readable confirmation or error copy.
    pub message: Option<String>,
    /// Contact flow only: a mailto link the host may navigate to.
    pub mailto_link: Option<String>,
}

impl SubmitOutcome {
    /// A plain success with no extra copy.
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
            mailto_link: None,
        }
    }

    /// A rejection carrying backend-provided copy.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            mailto_link: None,
        }
    }
}
