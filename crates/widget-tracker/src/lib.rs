//! Fire-and-forget analytics events for the NPO Bots widget.
//!
//! Every state transition of interest produces one [`TrackedEvent`]
//! carrying the event name, bot id, session id, ISO timestamp, page URL,
//! referrer, and call-specific payload fields. Events go to the backend
//! tracking endpoint and, when a host hook is registered, are mirrored to
//! it under a namespaced event name.
//!
//! [`EventTracker::track`] is infallible and non-blocking: delivery runs
//! on a spawned task, and every failure is swallowed (debug-logged only).
//! Analytics must never surface to the visitor or stall the state machine.

mod event;
mod mirror;
mod tracker;

pub use event::{PageContext, TrackedEvent};
pub use mirror::{AnalyticsMirror, LoggingMirror, NoOpMirror, MIRROR_PREFIX};
pub use tracker::EventTracker;
