//! HTTP gateway for the NPO Bots widget backend.
//!
//! This crate provides [`HttpGateway`], the production implementation of
//! the [`widget_core::BotApi`] trait, and [`RemoteResponder`], the AI chat
//! path over `POST /chat`.
//!
//! Policy:
//!
//! - Single attempt per interactive call; no retries. The state machine
//!   falls back to canned UX immediately on failure.
//! - Bounded request timeout (default 10s) so a request that never
//!   resolves cannot strand the typing indicator.
//! - Analytics posts share the same client but callers are expected to
//!   spawn and swallow them (see `widget-tracker`).

mod config;
mod gateway;
mod remote;
mod wire;

pub use config::GatewayConfig;
pub use gateway::HttpGateway;
pub use remote::RemoteResponder;
