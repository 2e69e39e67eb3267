//! Core types and traits for the NPO Bots embeddable widget.
//!
//! This crate provides the shared interface for the widget workspace:
//!
//! - [`WidgetConfig`] / [`Theme`] - Host-supplied configuration with typed defaults
//! - [`BotData`] - Server-supplied bot behavior, with a degraded-mode fallback
//! - [`Message`] / [`Transcript`] - The append-only conversation record
//! - [`BotApi`] - The trait every network gateway must implement
//! - [`Responder`] - The trait for chat reply producers (canned or AI)
//! - [`SessionStore`] - Persistence for the per-visitor session id
//! - [`WidgetError`] - Error types shared across the workspace
//!
//! # Example
//!
//! ```rust
//! use widget_core::{ChatReply, ChatRequest, Responder, WidgetError};
//! use widget_core::async_trait;
//!
//! struct MyResponder;
//!
//! #[async_trait]
//! impl Responder for MyResponder {
//!     async fn respond(&self, _request: ChatRequest) -> Result<ChatReply, WidgetError> {
//!         Ok(ChatReply::new("Hello!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyResponder"
//!     }
//! }
//! ```

mod api;
mod bot_data;
mod config;
mod error;
mod forms;
mod message;
mod responder;
mod session;

pub use api::BotApi;
pub use bot_data::BotData;
pub use config::{Position, Theme, WidgetConfig, WidgetConfigBuilder};
pub use error::WidgetError;
pub use forms::{ContactForm, SubmitOutcome, VolunteerForm};
pub use message::{Message, Sender, Transcript};
pub use responder::{ChatReply, ChatRequest, Responder};
pub use session::{
    generate_session_id, load_or_create, FileSessionStore, MemorySessionStore, SessionStore,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
