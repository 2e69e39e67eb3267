//! Error types for widget operations.

use thiserror::Error;

/// Errors that can occur in the widget workspace.
///
/// The widget must never let an error escape into the host page, so every
/// variant here is eventually converted into a user-visible degradation
/// (fallback data, apology message, inline form error) or a silent
/// debug-logged drop. The taxonomy mirrors that policy.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Fatal configuration error. The widget does not mount.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success HTTP status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered, but the payload did not decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// A responder failed to produce a reply.
    #[error("responder failed: {0}")]
    ResponderFailed(String),

    /// Session id persistence failed.
    #[error("session store error: {0}")]
    Session(String),
}
