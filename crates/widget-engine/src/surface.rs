//! Surface trait and implementations.
//!
//! A surface is whatever renders the widget for the visitor: the embed
//! script's DOM layer, a test recorder, or a console printer. The engine
//! owns all state; the surface only receives mount markup and incremental
//! updates. Surface failures are logged and swallowed by the engine - a
//! broken renderer must never corrupt the conversation state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use widget_core::Message;

use crate::error::EngineError;
use crate::markup::WidgetMarkup;
use crate::state::FormKind;

/// One incremental change for the renderer to apply.
#[derive(Debug, Clone)]
pub enum SurfaceUpdate {
    /// The chat panel opened.
    PanelOpened,
    /// The chat panel closed; the launcher is back alone.
    PanelClosed,
    /// A message was appended to the transcript.
    MessageAppended(Message),
    /// Show the bot typing indicator.
    TypingStarted,
    /// Remove the bot typing indicator.
    TypingStopped,
    /// Show a form; the actions panel hides while it is visible.
    FormShown(FormKind),
    /// Hide the active form and restore the actions panel.
    FormHidden,
    /// Show an inline error panel inside the form. Entered field values
    /// must be left untouched.
    FormError { form: FormKind, message: String },
    /// Enable or disable the form submit control (double-click protection).
    SubmitControlEnabled(bool),
    /// The host should navigate to this URL (donation page, mailto link).
    NavigationRequested { url: String },
}

/// Renders the widget for the visitor.
#[async_trait]
pub trait Surface: Send + Sync {
    /// True when a widget root with this marker id already exists.
    /// Used to refuse a second mount after an accidental double-include.
    async fn is_mounted(&self, root_id: &str) -> bool;

    /// Mount the widget root. Called at most once per surface.
    async fn mount(&self, markup: &WidgetMarkup) -> Result<(), EngineError>;

    /// Apply one incremental update.
    async fn apply(&self, update: SurfaceUpdate) -> Result<(), EngineError>;
}

#[async_trait]
impl<T: Surface + ?Sized> Surface for Arc<T> {
    async fn is_mounted(&self, root_id: &str) -> bool {
        (**self).is_mounted(root_id).await
    }

    async fn mount(&self, markup: &WidgetMarkup) -> Result<(), EngineError> {
        (**self).mount(markup).await
    }

    async fn apply(&self, update: SurfaceUpdate) -> Result<(), EngineError> {
        (**self).apply(update).await
    }
}

/// A surface that discards everything. Useful for headless tests.
#[derive(Debug, Clone, Default)]
pub struct NoOpSurface;

#[async_trait]
impl Surface for NoOpSurface {
    async fn is_mounted(&self, _root_id: &str) -> bool {
        false
    }

    async fn mount(&self, _markup: &WidgetMarkup) -> Result<(), EngineError> {
        Ok(())
    }

    async fn apply(&self, _update: SurfaceUpdate) -> Result<(), EngineError> {
        Ok(())
    }
}

/// A surface that logs every operation. Useful for debugging a host
/// integration before wiring a real renderer.
#[derive(Debug, Clone, Default)]
pub struct LoggingSurface;

#[async_trait]
impl Surface for LoggingSurface {
    async fn is_mounted(&self, _root_id: &str) -> bool {
        false
    }

    async fn mount(&self, markup: &WidgetMarkup) -> Result<(), EngineError> {
        info!(
            "[surface] mounted root '{}' ({} bytes html, {} bytes css)",
            markup.root_id,
            markup.html.len(),
            markup.stylesheet.len()
        );
        Ok(())
    }

    async fn apply(&self, update: SurfaceUpdate) -> Result<(), EngineError> {
        match &update {
            SurfaceUpdate::MessageAppended(message) => {
                info!("[surface] {:?}: {}", message.sender, message.text);
            }
            other => info!("[surface] {:?}", other),
        }
        Ok(())
    }
}
