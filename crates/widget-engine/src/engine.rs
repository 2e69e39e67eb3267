//! The widget engine - mount logic and the conversation state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mock_responder::{CannedResponder, DelayedResponder, DEFAULT_CANNED_DELAY};
use serde_json::json;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use widget_core::{
    BotApi, BotData, ChatRequest, ContactForm, Message, Responder, SubmitOutcome, Transcript,
    VolunteerForm, WidgetConfig,
};
use widget_gateway::RemoteResponder;
use widget_tracker::EventTracker;

use crate::error::EngineError;
use crate::markup::{build_markup, ROOT_ID};
use crate::state::{FormKind, WidgetState};
use crate::surface::{Surface, SurfaceUpdate};

/// Bot message appended when the chat path fails.
pub const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble responding right now. \
Please try again in a moment, or use the buttons below to get in touch.";

/// Copy for the inline form error panel when a submission fails.
const FORM_FAILURE_COPY: &str =
    "We couldn't send that just now. Please check your connection and try again.";

/// Default thank-you after a successful volunteer signup.
const VOLUNTEER_THANKS: &str = "Thank you for signing up to volunteer! \
We'll be in touch with next steps soon.";

/// Default thank-you after a successful contact submission.
const CONTACT_THANKS: &str = "Thanks for your message! We'll get back to you soon.";

#[derive(Debug, Default)]
struct UiState {
    state: WidgetState,
    /// Set on the first open ever, so reopening never duplicates the
    /// welcome message.
    welcomed: bool,
    /// Double-click protection for form submissions.
    submit_in_flight: bool,
}

/// Drives one embedded widget.
///
/// The engine owns the transcript, the UI state, and the responder choice;
/// the surface only renders. Everything that can fail on the network is
/// converted into fallback UX here - no error from the engine ever reaches
/// the visitor or the host page uncaught.
pub struct WidgetEngine<S: Surface> {
    config: WidgetConfig,
    surface: S,
    api: Arc<dyn BotApi>,
    tracker: EventTracker,
    bot_data: RwLock<BotData>,
    responder: RwLock<Option<Arc<dyn Responder>>>,
    transcript: Transcript,
    ui: Mutex<UiState>,
    mounted: AtomicBool,
    canned_delay: Duration,
}

impl<S: Surface> WidgetEngine<S> {
    /// Create an engine. Nothing renders until [`WidgetEngine::mount`].
    pub fn new(config: WidgetConfig, surface: S, api: Arc<dyn BotApi>, tracker: EventTracker) -> Self {
        Self {
            config,
            surface,
            api,
            tracker,
            bot_data: RwLock::new(BotData::fallback()),
            responder: RwLock::new(None),
            transcript: Transcript::new(),
            ui: Mutex::new(UiState::default()),
            mounted: AtomicBool::new(false),
            canned_delay: DEFAULT_CANNED_DELAY,
        }
    }

    /// Override the canned-reply latency (default 1.5s).
    pub fn with_canned_delay(mut self, delay: Duration) -> Self {
        self.canned_delay = delay;
        self
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Fetch bot data, build the scoped markup, and mount the surface.
    ///
    /// Idempotent guard: if this engine already mounted, or the surface
    /// reports an existing widget root (accidental double-include), the
    /// second mount is refused with [`EngineError::AlreadyMounted`] and the
    /// first widget is left untouched.
    ///
    /// A bot-data fetch failure is not fatal: the hardcoded fallback is
    /// substituted and the widget mounts fully interactive (degraded mode).
    pub async fn mount(&self) -> Result<(), EngineError> {
        if self
            .mounted
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("mount called twice on the same widget; refusing");
            return Err(EngineError::AlreadyMounted);
        }

        if self.surface.is_mounted(ROOT_ID).await {
            self.mounted.store(false, Ordering::SeqCst);
            warn!("widget root '{}' already present on this page; refusing", ROOT_ID);
            return Err(EngineError::AlreadyMounted);
        }

        let bot_data = match self.api.fetch_bot_data(&self.config.bot_id).await {
            Ok(data) => data,
            Err(e) => {
                warn!("bot data fetch failed, entering degraded mode: {}", e);
                BotData::fallback()
            }
        };

        // Trained bots answer over the chat endpoint; everything else gets
        // canned replies under a simulated typing delay.
        let responder: Arc<dyn Responder> = if bot_data.is_ai_trained {
            Arc::new(RemoteResponder::new(self.api.clone()))
        } else {
            Arc::new(DelayedResponder::new(
                CannedResponder::for_organization(&bot_data.name),
                self.canned_delay,
            ))
        };

        let markup = build_markup(&self.config, &bot_data);
        if let Err(e) = self.surface.mount(&markup).await {
            self.mounted.store(false, Ordering::SeqCst);
            return Err(e);
        }

        *self.bot_data.write().await = bot_data;
        *self.responder.write().await = Some(responder);

        info!("widget mounted for bot '{}'", self.config.bot_id);
        Ok(())
    }

    fn ensure_mounted(&self) -> Result<(), EngineError> {
        if self.mounted.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EngineError::NotMounted)
        }
    }

    /// Apply a surface update, swallowing renderer failures.
    async fn render(&self, update: SurfaceUpdate) {
        if let Err(e) = self.surface.apply(update).await {
            warn!("surface update failed: {}", e);
        }
    }

    /// Toggle the panel open or closed (launcher click).
    pub async fn toggle(&self) -> Result<(), EngineError> {
        self.ensure_mounted()?;

        let mut ui = self.ui.lock().await;
        if ui.state.is_open() {
            let had_form = ui.state.active_form().is_some();
            ui.state = WidgetState::Closed;
            ui.submit_in_flight = false;
            drop(ui);

            if had_form {
                self.render(SurfaceUpdate::FormHidden).await;
            }
            self.render(SurfaceUpdate::PanelClosed).await;
            self.tracker.track("widget_close", json!({}));
        } else {
            ui.state = WidgetState::OpenIdle;
            let first_open = !ui.welcomed;
            ui.welcomed = true;
            drop(ui);

            self.render(SurfaceUpdate::PanelOpened).await;
            if first_open {
                let welcome = self.bot_data.read().await.welcome_message.clone();
                let message = Message::bot(welcome);
                self.transcript.push(message.clone()).await;
                self.render(SurfaceUpdate::MessageAppended(message)).await;
            }
            self.tracker.track("widget_open", json!({ "firstOpen": first_open }));
        }

        Ok(())
    }

    /// Close the panel after a click outside the widget root.
    pub async fn outside_click(&self) -> Result<(), EngineError> {
        self.ensure_mounted()?;

        let is_open = self.ui.lock().await.state.is_open();
        if is_open {
            self.toggle().await?;
        }
        Ok(())
    }

    /// Send a visitor chat message.
    ///
    /// The user message is appended immediately (optimistic - it always
    /// succeeds). The reply path then runs under the typing indicator:
    /// either the AI endpoint or the canned responder. On any failure the
    /// fixed apology is appended instead; the machine never stays in the
    /// typing state. Sending while a form is up dismisses the form first.
    /// A reply arriving after the panel closed still lands
    /// in the (hidden) transcript so the conversation is consistent when
    /// reopened.
    pub async fn send_message(&self, text: impl Into<String>) -> Result<(), EngineError> {
        self.ensure_mounted()?;

        let text = text.into();
        if text.trim().is_empty() {
            return Ok(());
        }

        let had_form = {
            let mut ui = self.ui.lock().await;
            if !ui.state.is_open() {
                debug!("ignoring send_message while closed");
                return Ok(());
            }
            let had_form = ui.state.active_form().is_some();
            ui.state = WidgetState::OpenTyping;
            had_form
        };
        // Typing a message dismisses an open form the same way cancel does;
        // otherwise the rendered form would outlive its state.
        if had_form {
            self.render(SurfaceUpdate::FormHidden).await;
        }

        let user_message = Message::user(text.clone());
        self.transcript.push(user_message.clone()).await;
        self.render(SurfaceUpdate::MessageAppended(user_message)).await;
        self.render(SurfaceUpdate::TypingStarted).await;
        self.tracker.track("message_sent", json!({ "length": text.len() }));

        let request = ChatRequest::new(
            &self.config.bot_id,
            self.tracker.session_id(),
            &text,
        );
        let responder = self.responder.read().await.clone();

        let reply_text = match responder {
            Some(responder) => match responder.respond(request).await {
                Ok(reply) => {
                    self.tracker
                        .track("message_received", json!({ "source": responder.name() }));
                    reply.text
                }
                Err(e) => {
                    warn!("responder failed, using apology reply: {}", e);
                    self.tracker.track("chat_error", json!({ "error": e.to_string() }));
                    FALLBACK_REPLY.to_string()
                }
            },
            None => FALLBACK_REPLY.to_string(),
        };

        let bot_message = Message::bot(reply_text);
        self.transcript.push(bot_message.clone()).await;
        self.render(SurfaceUpdate::MessageAppended(bot_message)).await;

        // Leave typing only if nothing else moved the state meanwhile; a
        // close during the round-trip stays closed.
        {
            let mut ui = self.ui.lock().await;
            if ui.state == WidgetState::OpenTyping {
                ui.state = WidgetState::OpenIdle;
            }
        }
        self.render(SurfaceUpdate::TypingStopped).await;

        Ok(())
    }

    /// Show the volunteer or contact form (action button click).
    pub async fn open_form(&self, kind: FormKind) -> Result<(), EngineError> {
        self.ensure_mounted()?;

        {
            let mut ui = self.ui.lock().await;
            if ui.state != WidgetState::OpenIdle {
                debug!("ignoring open_form from {:?}", ui.state);
                return Ok(());
            }
            ui.state = WidgetState::OpenForm(kind);
        }

        self.render(SurfaceUpdate::FormShown(kind)).await;
        self.tracker
            .track("button_click", json!({ "button": kind.as_str() }));
        Ok(())
    }

    /// Hide the active form without submitting (cancel).
    pub async fn close_form(&self) -> Result<(), EngineError> {
        self.ensure_mounted()?;

        {
            let mut ui = self.ui.lock().await;
            if ui.state.active_form().is_none() {
                return Ok(());
            }
            ui.state = WidgetState::OpenIdle;
        }

        self.render(SurfaceUpdate::FormHidden).await;
        Ok(())
    }

    /// Submit the volunteer signup form.
    pub async fn submit_volunteer(&self, form: VolunteerForm) -> Result<(), EngineError> {
        self.ensure_mounted()?;
        let outcome = self
            .submit_form(FormKind::Volunteer, || async {
                self.api.submit_volunteer(&self.config.bot_id, &form).await
            })
            .await;

        if let Some(outcome) = outcome {
            self.finish_submit(FormKind::Volunteer, outcome, VOLUNTEER_THANKS)
                .await;
        }
        Ok(())
    }

    /// Submit the contact form.
    pub async fn submit_contact(&self, form: ContactForm) -> Result<(), EngineError> {
        self.ensure_mounted()?;
        let outcome = self
            .submit_form(FormKind::Contact, || async {
                self.api.submit_contact(&self.config.bot_id, &form).await
            })
            .await;

        if let Some(outcome) = outcome {
            if outcome.success {
                if let Some(mailto) = outcome.mailto_link.clone() {
                    self.render(SurfaceUpdate::NavigationRequested { url: mailto })
                        .await;
                }
            }
            self.finish_submit(FormKind::Contact, outcome, CONTACT_THANKS).await;
        }
        Ok(())
    }

    /// Shared submit plumbing: in-flight guard, disabled submit control,
    /// attempt tracking, network error conversion. Returns `None` when a
    /// submission is already in flight.
    async fn submit_form<F, Fut>(&self, kind: FormKind, call: F) -> Option<SubmitOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<SubmitOutcome, widget_core::WidgetError>>,
    {
        {
            let mut ui = self.ui.lock().await;
            if ui.submit_in_flight {
                debug!("submit already in flight; ignoring duplicate");
                return None;
            }
            ui.submit_in_flight = true;
        }

        self.render(SurfaceUpdate::SubmitControlEnabled(false)).await;
        self.tracker
            .track("form_submit", json!({ "form": kind.as_str() }));

        let outcome = match call().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("{} form submission failed: {}", kind.as_str(), e);
                SubmitOutcome::rejected(FORM_FAILURE_COPY)
            }
        };

        // Re-enable the control regardless of outcome, before any further
        // rendering, so a failure never leaves the button stuck disabled.
        self.ui.lock().await.submit_in_flight = false;
        self.render(SurfaceUpdate::SubmitControlEnabled(true)).await;

        Some(outcome)
    }

    async fn finish_submit(&self, kind: FormKind, outcome: SubmitOutcome, default_thanks: &str) {
        if outcome.success {
            {
                let mut ui = self.ui.lock().await;
                if ui.state == WidgetState::OpenForm(kind) {
                    ui.state = WidgetState::OpenIdle;
                }
            }
            self.render(SurfaceUpdate::FormHidden).await;

            let thanks = outcome.message.unwrap_or_else(|| default_thanks.to_string());
            let message = Message::bot(thanks);
            self.transcript.push(message.clone()).await;
            self.render(SurfaceUpdate::MessageAppended(message)).await;

            self.tracker
                .track("form_submit_success", json!({ "form": kind.as_str() }));
        } else {
            // Inline error only; the form stays up and the surface must
            // leave entered field values untouched.
            let copy = outcome.message.unwrap_or_else(|| FORM_FAILURE_COPY.to_string());
            self.render(SurfaceUpdate::FormError {
                form: kind,
                message: copy.clone(),
            })
            .await;
            self.tracker.track(
                "form_submit_error",
                json!({ "form": kind.as_str(), "message": copy }),
            );
        }
    }

    /// Handle a donation quick-reply click.
    ///
    /// With a configured donation URL the host is asked to navigate; with
    /// none, exactly one bot message referencing the literal amount is
    /// appended and no navigation happens.
    pub async fn donation_click(&self, amount: u32) -> Result<(), EngineError> {
        self.ensure_mounted()?;

        self.tracker
            .track("button_click", json!({ "button": "donation", "amount": amount }));

        let donation_url = self.bot_data.read().await.donation_url.clone();
        match donation_url {
            Some(url) => {
                self.render(SurfaceUpdate::NavigationRequested { url }).await;
            }
            None => {
                let message = Message::bot(format!(
                    "Thank you so much for your generous ${} donation! \
                     Your support helps us keep our programs running.",
                    amount
                ));
                self.transcript.push(message.clone()).await;
                self.render(SurfaceUpdate::MessageAppended(message)).await;
            }
        }
        Ok(())
    }

    /// Record a video play/pause interaction.
    pub async fn video_event(&self, playing: bool) -> Result<(), EngineError> {
        self.ensure_mounted()?;
        let event = if playing { "video_play" } else { "video_pause" };
        self.tracker.track(event, json!({}));
        Ok(())
    }

    /// Current UI state.
    pub async fn state(&self) -> WidgetState {
        self.ui.lock().await.state
    }

    /// Snapshot of the conversation, in append order.
    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.snapshot().await
    }

    /// The bot data in effect (fetched or fallback).
    pub async fn bot_data(&self) -> BotData {
        self.bot_data.read().await.clone()
    }

    /// The minimal host-facing handle.
    pub fn handle(self: &Arc<Self>) -> WidgetHandle<S> {
        WidgetHandle {
            engine: self.clone(),
        }
    }
}

/// The only surface exposed to host-page callers: `toggle` and
/// `send_message`. Everything else stays behind the engine.
pub struct WidgetHandle<S: Surface> {
    engine: Arc<WidgetEngine<S>>,
}

impl<S: Surface> Clone for WidgetHandle<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<S: Surface> WidgetHandle<S> {
    /// Toggle the panel open or closed.
    pub async fn toggle(&self) -> Result<(), EngineError> {
        self.engine.toggle().await
    }

    /// Send a visitor chat message.
    pub async fn send_message(&self, text: impl Into<String>) -> Result<(), EngineError> {
        self.engine.send_message(text).await
    }
}
