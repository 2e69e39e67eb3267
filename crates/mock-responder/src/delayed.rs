//! Delayed responder - wraps another responder with artificial latency.

use std::time::Duration;

use tokio::time::sleep;
use widget_core::{async_trait, ChatReply, ChatRequest, Responder, WidgetError};

/// Default canned-reply latency.
///
/// Canned replies resolve instantly; the pause makes them read like a
/// typed answer under the typing indicator.
pub const DEFAULT_CANNED_DELAY: Duration = Duration::from_millis(1500);

/// A responder that wraps another responder and adds artificial delay.
pub struct DelayedResponder<R: Responder> {
    inner: R,
    delay: Duration,
}

impl<R: Responder> DelayedResponder<R> {
    /// Wrap the given responder with the specified delay.
    pub fn new(inner: R, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Wrap with a delay in milliseconds.
    pub fn with_millis(inner: R, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Wrap with the default canned-reply latency.
    pub fn with_default_delay(inner: R) -> Self {
        Self::new(inner, DEFAULT_CANNED_DELAY)
    }
}

#[async_trait]
impl<R: Responder> Responder for DelayedResponder<R> {
    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, WidgetError> {
        sleep(self.delay).await;
        self.inner.respond(request).await
    }

    fn name(&self) -> &str {
        "DelayedResponder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CannedResponder;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delay_applied() {
        let responder = DelayedResponder::with_millis(CannedResponder::new(), 100);

        let start = Instant::now();
        let reply = responder
            .respond(ChatRequest::new("bot-1", "s-1", "thanks"))
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert!(reply.text.contains("welcome"));
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_zero_delay_passthrough() {
        let responder = DelayedResponder::with_millis(CannedResponder::new(), 0);
        let reply = responder
            .respond(ChatRequest::new("bot-1", "s-1", "volunteer"))
            .await
            .unwrap();
        assert!(reply.text.contains("Volunteer"));
    }

    #[tokio::test]
    async fn test_responder_name() {
        let responder = DelayedResponder::with_default_delay(CannedResponder::new());
        assert_eq!(responder.name(), "DelayedResponder");
        assert_eq!(responder.delay, DEFAULT_CANNED_DELAY);
    }
}
