//! Error types for engine operations.

use thiserror::Error;
use widget_core::WidgetError;

/// Errors that can occur while driving the widget.
///
/// These stay inside the embedding host; the engine converts everything
/// the visitor could hit into fallback UX instead of propagating it.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A widget root already exists; the second mount was refused.
    #[error("widget already mounted; refusing second mount")]
    AlreadyMounted,

    /// An operation was invoked before `mount()`.
    #[error("widget not mounted")]
    NotMounted,

    /// The surface failed to apply an update.
    #[error("surface error: {0}")]
    Surface(String),

    /// An underlying widget error.
    #[error(transparent)]
    Widget(#[from] WidgetError),
}
