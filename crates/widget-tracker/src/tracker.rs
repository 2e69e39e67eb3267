//! The event tracker.

use std::sync::{Arc, OnceLock};

use serde_json::Value;
use tracing::{debug, warn};
use widget_core::{load_or_create, BotApi, SessionStore};

use crate::event::{PageContext, TrackedEvent};
use crate::mirror::{AnalyticsMirror, MIRROR_PREFIX};

/// Fires structured analytics events, fire-and-forget.
///
/// Delivery runs on a spawned task so tracking can never block a state
/// transition. Failures - unreachable endpoint, missing runtime, broken
/// mirror hook - are swallowed and debug-logged.
pub struct EventTracker {
    api: Arc<dyn BotApi>,
    bot_id: String,
    session_store: Arc<dyn SessionStore>,
    session_id: OnceLock<String>,
    page: PageContext,
    mirror: Option<Arc<dyn AnalyticsMirror>>,
    debug: bool,
}

impl EventTracker {
    /// Create a tracker for one bot.
    pub fn new(
        api: Arc<dyn BotApi>,
        bot_id: impl Into<String>,
        session_store: Arc<dyn SessionStore>,
        page: PageContext,
    ) -> Self {
        Self {
            api,
            bot_id: bot_id.into(),
            session_store,
            session_id: OnceLock::new(),
            page,
            mirror: None,
            debug: false,
        }
    }

    /// Mirror every event into a host analytics hook.
    pub fn with_mirror(mut self, mirror: Arc<dyn AnalyticsMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Log swallowed failures at warn instead of debug.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The visitor's session id, created lazily on the first call and
    /// persisted through the session store.
    pub fn session_id(&self) -> &str {
        self.session_id
            .get_or_init(|| load_or_create(self.session_store.as_ref()))
    }

    /// Fire one analytics event.
    ///
    /// Never blocks, never panics, never returns an error. The event is
    /// mirrored synchronously (hook errors swallowed), then posted to the
    /// backend on a spawned task.
    pub fn track(&self, event: &str, payload: Value) {
        let tracked = TrackedEvent::new(
            event,
            self.bot_id.clone(),
            self.session_id().to_string(),
            &self.page,
            payload,
        );
        let data = tracked.to_data();

        if let Some(ref mirror) = self.mirror {
            let namespaced = format!("{}{}", MIRROR_PREFIX, event);
            if let Err(e) = mirror.mirror(&namespaced, &data) {
                self.log_failure("mirror hook", &e.to_string());
            }
        }

        // Without a runtime there is nothing to deliver on; drop the event
        // instead of panicking inside the host.
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                self.log_failure("delivery", "no async runtime available");
                return;
            }
        };

        let api = self.api.clone();
        let event = event.to_string();
        let debug_mode = self.debug;
        handle.spawn(async move {
            if let Err(e) = api.track(&event, data).await {
                if debug_mode {
                    warn!("analytics event '{}' dropped: {}", event, e);
                } else {
                    debug!("analytics event '{}' dropped: {}", event, e);
                }
            }
        });
    }

    fn log_failure(&self, what: &str, err: &str) {
        if self.debug {
            warn!("analytics {} failed: {}", what, err);
        } else {
            debug!("analytics {} failed: {}", what, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use widget_core::{
        async_trait, BotData, ContactForm, MemorySessionStore, SubmitOutcome, VolunteerForm,
        WidgetError,
    };

    struct CountingApi {
        delivered: AtomicUsize,
        fail: bool,
    }

    impl CountingApi {
        fn new(fail: bool) -> Self {
            Self {
                delivered: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl BotApi for CountingApi {
        async fn fetch_bot_data(&self, _bot_id: &str) -> Result<BotData, WidgetError> {
            Ok(BotData::fallback())
        }

        async fn send_chat(
            &self,
            _bot_id: &str,
            _session_id: &str,
            _message: &str,
        ) -> Result<String, WidgetError> {
            Ok("ok".to_string())
        }

        async fn submit_volunteer(
            &self,
            _bot_id: &str,
            _form: &VolunteerForm,
        ) -> Result<SubmitOutcome, WidgetError> {
            Ok(SubmitOutcome::accepted())
        }

        async fn submit_contact(
            &self,
            _bot_id: &str,
            _form: &ContactForm,
        ) -> Result<SubmitOutcome, WidgetError> {
            Ok(SubmitOutcome::accepted())
        }

        async fn track(&self, _event: &str, _data: Value) -> Result<(), WidgetError> {
            if self.fail {
                return Err(WidgetError::Network("unreachable".to_string()));
            }
            self.delivered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RecordingMirror {
        names: Mutex<Vec<String>>,
    }

    impl AnalyticsMirror for RecordingMirror {
        fn mirror(&self, event: &str, _data: &Value) -> Result<(), WidgetError> {
            self.names.lock().unwrap().push(event.to_string());
            Ok(())
        }
    }

    struct BrokenMirror;

    impl AnalyticsMirror for BrokenMirror {
        fn mirror(&self, _event: &str, _data: &Value) -> Result<(), WidgetError> {
            Err(WidgetError::Session("host hook exploded".to_string()))
        }
    }

    fn tracker_with(api: Arc<CountingApi>) -> EventTracker {
        EventTracker::new(
            api,
            "bot-1",
            Arc::new(MemorySessionStore::new()),
            PageContext::new("https://example.org"),
        )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_event_delivered() {
        let api = Arc::new(CountingApi::new(false));
        let tracker = tracker_with(api.clone());

        tracker.track("widget_open", json!({"firstOpen": true}));

        // Delivery is async; give the spawned task a moment.
        for _ in 0..50 {
            if api.delivered.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(api.delivered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_endpoint_failure_is_silent() {
        let api = Arc::new(CountingApi::new(true));
        let tracker = tracker_with(api);

        // Must not panic or error.
        tracker.track("widget_open", json!({}));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_broken_mirror_is_silent() {
        let api = Arc::new(CountingApi::new(false));
        let tracker = tracker_with(api).with_mirror(Arc::new(BrokenMirror));

        tracker.track("message_sent", json!({"length": 5}));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_mirror_gets_namespaced_name() {
        let api = Arc::new(CountingApi::new(false));
        let mirror = Arc::new(RecordingMirror {
            names: Mutex::new(Vec::new()),
        });
        let tracker = tracker_with(api).with_mirror(mirror.clone());

        tracker.track("widget_open", json!({}));
        tracker.track("form_submit", json!({"form": "volunteer"}));

        let names = mirror.names.lock().unwrap().clone();
        assert_eq!(names, vec!["npo_bots_widget_open", "npo_bots_form_submit"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_session_id_lazy_and_stable() {
        let api = Arc::new(CountingApi::new(false));
        let store = Arc::new(MemorySessionStore::new());
        let tracker = EventTracker::new(
            api,
            "bot-1",
            store.clone(),
            PageContext::new("https://example.org"),
        );

        // Nothing persisted until the first use.
        assert_eq!(store.load().unwrap(), None);

        let first = tracker.session_id().to_string();
        assert_eq!(store.load().unwrap(), Some(first.clone()));

        tracker.track("widget_open", json!({}));
        assert_eq!(tracker.session_id(), first);
    }

    #[test]
    fn test_track_without_runtime_does_not_panic() {
        let api = Arc::new(CountingApi::new(false));
        let tracker = tracker_with(api);

        // No tokio runtime here; the event is dropped, not panicked on.
        tracker.track("widget_open", json!({}));
    }
}
