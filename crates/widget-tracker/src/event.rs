//! Analytics event types.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

/// Where the widget is embedded, captured once at mount.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Current page URL.
    pub url: String,
    /// Referrer, if the host knows one.
    pub referrer: Option<String>,
}

impl PageContext {
    /// Create a page context for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referrer: None,
        }
    }

    /// Set the referrer.
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// One structured analytics event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEvent {
    pub event: String,
    pub bot_id: String,
    pub session_id: String,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub url: String,
    pub referrer: Option<String>,
    /// Call-specific payload fields, flattened into the wire `data` object.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl TrackedEvent {
    /// Build an event stamped now.
    pub fn new(
        event: impl Into<String>,
        bot_id: impl Into<String>,
        session_id: impl Into<String>,
        page: &PageContext,
        payload: Value,
    ) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                // Non-object payloads are wrapped rather than dropped.
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        Self {
            event: event.into(),
            bot_id: bot_id.into(),
            session_id: session_id.into(),
            timestamp: Utc::now().to_rfc3339(),
            url: page.url.clone(),
            referrer: page.referrer.clone(),
            payload,
        }
    }

    /// The wire `data` object for `POST /track`.
    pub fn to_data(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
