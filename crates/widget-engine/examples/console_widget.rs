//! Console widget demo.
//!
//! Drives the widget engine against a logging surface so you can watch
//! the state machine work without a browser.
//!
//! Run with: cargo run -p widget-engine --example console_widget
//!
//! Configuration via .env file or environment variables:
//!   NPO_BOT_ID                - Chatbot id (required)
//!   NPO_API_URL               - Backend base URL (default: https://api.npobots.com)
//!   NPO_REQUEST_TIMEOUT_SECS  - Per-request timeout (default: 10)

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use widget_core::{FileSessionStore, WidgetConfig};
use widget_engine::{LoggingSurface, WidgetEngine};
use widget_gateway::HttpGateway;
use widget_tracker::{EventTracker, LoggingMirror, PageContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let bot_id = std::env::var("NPO_BOT_ID").unwrap_or_else(|_| "demo-bot".to_string());
    let config = WidgetConfig::builder(&bot_id)
        .primary_color("#16a34a")
        .debug(true)
        .build()?;

    let api = Arc::new(HttpGateway::from_env()?);
    let session_path = std::env::temp_dir().join("npo-widget-session");
    let tracker = EventTracker::new(
        api.clone(),
        &bot_id,
        Arc::new(FileSessionStore::new(session_path)),
        PageContext::new("https://demo.local/console"),
    )
    .with_mirror(Arc::new(LoggingMirror))
    .with_debug(true);

    let engine = Arc::new(
        WidgetEngine::new(config, LoggingSurface, api, tracker)
            .with_canned_delay(Duration::from_millis(400)),
    );
    engine.mount().await?;

    let bot = engine.bot_data().await;
    info!("mounted '{}' (ai trained: {})", bot.name, bot.is_ai_trained);

    let handle = engine.handle();
    handle.toggle().await?;
    handle.send_message("Hi! How can I volunteer?").await?;
    handle.send_message("And how do I donate?").await?;
    engine.donation_click(50).await?;
    handle.toggle().await?;

    for message in engine.transcript().await {
        info!("{:?}: {}", message.sender, message.text);
    }

    Ok(())
}
