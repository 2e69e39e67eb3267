//! Conversation state machine and mount logic for the NPO Bots widget.
//!
//! This crate provides the [`WidgetEngine`], which coordinates everything
//! a mounted widget does: open/close toggling, the optimistic message
//! flow under the typing indicator, volunteer/contact forms, donation
//! quick-replies, and analytics side effects.
//!
//! # Architecture
//!
//! ```text
//! Host page / embed script
//!          ↓ WidgetHandle { toggle, send_message }
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       WIDGET ENGINE                         │
//! │                                                             │
//! │  mount: fetch BotData (fallback on failure)                 │
//! │         build scoped markup, refuse a second root           │
//! │         ↓                                                   │
//! │  state machine: Closed / OpenIdle / OpenTyping / OpenForm   │
//! │         ↓                                                   │
//! │  responder: RemoteResponder (AI) or canned with delay       │
//! │         ↓                                                   │
//! │  Surface::apply(update)        EventTracker::track(event)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use widget_core::{FileSessionStore, WidgetConfig};
//! use widget_engine::{LoggingSurface, WidgetEngine};
//! use widget_gateway::HttpGateway;
//! use widget_tracker::{EventTracker, PageContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WidgetConfig::builder("bot-123").build()?;
//!     let api = Arc::new(HttpGateway::from_env()?);
//!     let tracker = EventTracker::new(
//!         api.clone(),
//!         &config.bot_id,
//!         Arc::new(FileSessionStore::new(".npo-session")),
//!         PageContext::new("https://example.org"),
//!     );
//!
//!     let engine = Arc::new(WidgetEngine::new(config, LoggingSurface, api, tracker));
//!     engine.mount().await?;
//!
//!     let handle = engine.handle();
//!     handle.toggle().await?;
//!     handle.send_message("How do I volunteer?").await?;
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod markup;
mod state;
mod surface;

pub use engine::{WidgetEngine, WidgetHandle, FALLBACK_REPLY};
pub use error::EngineError;
pub use markup::{build_markup, escape_text, linkify, WidgetMarkup, CSS_PREFIX, ROOT_ID};
pub use state::{FormKind, WidgetState};
pub use surface::{LoggingSurface, NoOpSurface, Surface, SurfaceUpdate};

// Re-export commonly used types from dependencies
pub use widget_core::{BotData, Message, Sender, WidgetConfig, WidgetError};
pub use widget_tracker::{EventTracker, PageContext};
