//! Host-page analytics mirroring.

use serde_json::Value;
use widget_core::WidgetError;

/// Prefix for event names mirrored into the host's analytics tool.
pub const MIRROR_PREFIX: &str = "npo_bots_";

/// A host-page analytics hook (the `gtag`/`dataLayer` counterpart).
///
/// Implementations receive every tracked event under a namespaced name.
/// Errors are swallowed by the tracker; a broken hook never affects the
/// widget.
pub trait AnalyticsMirror: Send + Sync {
    /// Receive one mirrored event.
    fn mirror(&self, event: &str, data: &Value) -> Result<(), WidgetError>;
}

/// A no-op mirror for hosts without an analytics tool.
#[derive(Debug, Clone, Default)]
pub struct NoOpMirror;

impl AnalyticsMirror for NoOpMirror {
    fn mirror(&self, _event: &str, _data: &Value) -> Result<(), WidgetError> {
        Ok(())
    }
}

/// A logging mirror for debugging.
#[derive(Debug, Clone, Default)]
pub struct LoggingMirror;

impl AnalyticsMirror for LoggingMirror {
    fn mirror(&self, event: &str, data: &Value) -> Result<(), WidgetError> {
        tracing::info!("[mirror] {}: {}", event, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_noop_mirror() {
        let mirror = NoOpMirror;
        mirror.mirror("npo_bots_widget_open", &json!({})).unwrap();
    }

    #[test]
    fn test_logging_mirror() {
        let mirror = LoggingMirror;
        mirror
            .mirror("npo_bots_message_sent", &json!({"length": 12}))
            .unwrap();
    }
}
