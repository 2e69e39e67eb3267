//! Canned responder implementations for the NPO Bots widget.
//!
//! This crate provides the non-AI chat path:
//! - `CannedResponder` - Keyword-matched fixed copy
//! - `DelayedResponder` - Wraps another responder with artificial latency
//!
//! Bots without a trained model use `DelayedResponder<CannedResponder>`;
//! the delay simulates response latency so canned replies do not feel
//! instantaneous. For trained bots, use `RemoteResponder` from the
//! `widget-gateway` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_responder::{CannedResponder, DelayedResponder};
//! use widget_core::{ChatRequest, Responder};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), widget_core::WidgetError> {
//!     let responder = DelayedResponder::with_millis(CannedResponder::new(), 0);
//!
//!     let request = ChatRequest::new("bot-1", "session-1", "How do I volunteer?");
//!     let reply = responder.respond(request).await?;
//!     println!("Reply: {}", reply.text);
//!     Ok(())
//! }
//! ```

mod canned;
mod delayed;

pub use canned::CannedResponder;
pub use delayed::{DelayedResponder, DEFAULT_CANNED_DELAY};

// Re-export widget-core types for convenience
pub use widget_core::{async_trait, ChatReply, ChatRequest, Responder, WidgetError};
