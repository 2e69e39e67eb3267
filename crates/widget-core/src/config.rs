//! Host-supplied widget configuration.
//!
//! The host embeds one configuration object per page. It is read once,
//! validated, and immutable afterwards. Every theme field defaults
//! independently, so a host can override a single color without losing
//! the rest of the defaults.

use serde::Deserialize;

use crate::error::WidgetError;

/// Corner of the host page the widget anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    /// CSS-friendly name, matching the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
        }
    }
}

/// Visual theme, merged field-by-field over these defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Accent color for the launcher button and header.
    pub primary_color: String,
    /// Secondary accent, used for hover and user message bubbles.
    pub secondary_color: String,
    /// Text color on primary-colored surfaces.
    pub text_color: String,
    /// Corner radius for the panel and bubbles.
    pub border_radius: String,
    /// Font stack for all widget text.
    pub font_family: String,
    /// Base font size.
    pub font_size: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#1e40af".to_string(),
            text_color: "#ffffff".to_string(),
            border_radius: "12px".to_string(),
            font_family: "system-ui, -apple-system, sans-serif".to_string(),
            font_size: "14px".to_string(),
        }
    }
}

/// Partial theme as supplied by the host. Every field is optional;
/// missing fields take the documented default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOverrides {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    pub border_radius: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
}

impl ThemeOverrides {
    /// Merge these overrides over the default theme, field by field.
    pub fn resolve(self) -> Theme {
        let defaults = Theme::default();
        Theme {
            primary_color: self.primary_color.unwrap_or(defaults.primary_color),
            secondary_color: self.secondary_color.unwrap_or(defaults.secondary_color),
            text_color: self.text_color.unwrap_or(defaults.text_color),
            border_radius: self.border_radius.unwrap_or(defaults.border_radius),
            font_family: self.font_family.unwrap_or(defaults.font_family),
            font_size: self.font_size.unwrap_or(defaults.font_size),
        }
    }
}

/// Resolved widget configuration.
///
/// Built through [`WidgetConfigBuilder`] or [`WidgetConfig::from_json`].
/// `bot_id` is the only required field; a missing or empty `bot_id` is a
/// fatal configuration error and nothing mounts.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Identifies the chatbot; required.
    pub bot_id: String,
    /// Backend base URL. Default: `https://api.npobots.com`.
    pub api_url: String,
    /// Corner anchor. Default: bottom-right.
    pub position: Position,
    /// Resolved visual theme.
    pub theme: Theme,
    /// Extra CSS appended after the generated stylesheet.
    pub custom_css: Option<String>,
    /// Enables debug logging of swallowed failures.
    pub debug: bool,
    /// Host-level contact email override.
    pub email: Option<String>,
    /// Host-level contact phone override.
    pub phone: Option<String>,
}

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "https://api.npobots.com";

impl WidgetConfig {
    /// Create a new config builder.
    pub fn builder(bot_id: impl Into<String>) -> WidgetConfigBuilder {
        WidgetConfigBuilder::new(bot_id)
    }

    /// Parse a host-supplied JSON configuration object.
    ///
    /// This is the Rust counterpart of the page-global config object the
    /// embed script reads at load time.
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        let raw: RawConfig = serde_json::from_str(raw)
            .map_err(|e| WidgetError::Configuration(format!("invalid config JSON: {}", e)))?;

        let mut builder = WidgetConfigBuilder::new(raw.bot_id.unwrap_or_default());
        if let Some(api_url) = raw.api_url {
            builder = builder.api_url(api_url);
        }
        if let Some(position) = raw.position {
            builder = builder.position(position);
        }
        builder.theme_overrides = raw.theme.unwrap_or_default();
        builder.custom_css = raw.custom_css;
        builder.debug = raw.debug.unwrap_or(false);
        builder.email = raw.email;
        builder.phone = raw.phone;
        builder.build()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    bot_id: Option<String>,
    api_url: Option<String>,
    position: Option<Position>,
    theme: Option<ThemeOverrides>,
    custom_css: Option<String>,
    debug: Option<bool>,
    email: Option<String>,
    phone: Option<String>,
}

/// Builder for [`WidgetConfig`].
#[derive(Debug)]
pub struct WidgetConfigBuilder {
    bot_id: String,
    api_url: String,
    position: Position,
    theme_overrides: ThemeOverrides,
    custom_css: Option<String>,
    debug: bool,
    email: Option<String>,
    phone: Option<String>,
}

impl WidgetConfigBuilder {
    /// Start a builder for the given bot id.
    pub fn new(bot_id: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            api_url: DEFAULT_API_URL.to_string(),
            position: Position::default(),
            theme_overrides: ThemeOverrides::default(),
            custom_css: None,
            debug: false,
            email: None,
            phone: None,
        }
    }

    /// Set the backend base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the corner anchor.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Override the primary color.
    pub fn primary_color(mut self, color: impl Into<String>) -> Self {
        self.theme_overrides.primary_color = Some(color.into());
        self
    }

    /// Override the secondary color.
    pub fn secondary_color(mut self, color: impl Into<String>) -> Self {
        self.theme_overrides.secondary_color = Some(color.into());
        self
    }

    /// Override the text color.
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.theme_overrides.text_color = Some(color.into());
        self
    }

    /// Override the border radius.
    pub fn border_radius(mut self, radius: impl Into<String>) -> Self {
        self.theme_overrides.border_radius = Some(radius.into());
        self
    }

    /// Override the font family.
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.theme_overrides.font_family = Some(family.into());
        self
    }

    /// Override the font size.
    pub fn font_size(mut self, size: impl Into<String>) -> Self {
        self.theme_overrides.font_size = Some(size.into());
        self
    }

    /// Append custom CSS after the generated stylesheet.
    pub fn custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    /// Enable debug logging of swallowed failures.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the host-level contact email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the host-level contact phone.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validate and resolve the configuration.
    ///
    /// Fails with [`WidgetError::Configuration`] when `bot_id` is empty.
    pub fn build(self) -> Result<WidgetConfig, WidgetError> {
        if self.bot_id.trim().is_empty() {
            return Err(WidgetError::Configuration(
                "botId is required; widget will not mount".to_string(),
            ));
        }

        Ok(WidgetConfig {
            bot_id: self.bot_id,
            api_url: self.api_url.trim_end_matches('/').to_string(),
            position: self.position,
            theme: self.theme_overrides.resolve(),
            custom_css: self.custom_css,
            debug: self.debug,
            email: self.email,
            phone: self.phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::builder("bot-123").build().unwrap();

        assert_eq!(config.bot_id, "bot-123");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.position, Position::BottomRight);
        assert_eq!(config.theme.primary_color, "#3b82f6");
        assert_eq!(config.theme.border_radius, "12px");
        assert!(config.custom_css.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_missing_bot_id_is_fatal() {
        let result = WidgetConfig::builder("").build();
        assert!(matches!(result, Err(WidgetError::Configuration(_))));

        let result = WidgetConfig::builder("   ").build();
        assert!(matches!(result, Err(WidgetError::Configuration(_))));
    }

    #[test]
    fn test_theme_merges_field_by_field() {
        let config = WidgetConfig::builder("bot-123")
            .primary_color("#ff0000")
            .font_size("16px")
            .build()
            .unwrap();

        assert_eq!(config.theme.primary_color, "#ff0000");
        assert_eq!(config.theme.font_size, "16px");
        // Untouched fields keep their defaults
        assert_eq!(config.theme.secondary_color, "#1e40af");
        assert_eq!(config.theme.border_radius, "12px");
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = WidgetConfig::builder("bot-123")
            .api_url("https://example.org/api/")
            .build()
            .unwrap();
        assert_eq!(config.api_url, "https://example.org/api");
    }

    #[test]
    fn test_from_json_full() {
        let raw = r##"{
            "botId": "bot-42",
            "apiUrl": "https://api.example.org",
            "position": "top-left",
            "theme": {"primaryColor": "#112233", "borderRadius": "4px"},
            "customCss": ".npo-bots-root { margin: 0; }",
            "debug": true,
            "email": "hello@example.org"
        }"##;

        let config = WidgetConfig::from_json(raw).unwrap();
        assert_eq!(config.bot_id, "bot-42");
        assert_eq!(config.api_url, "https://api.example.org");
        assert_eq!(config.position, Position::TopLeft);
        assert_eq!(config.theme.primary_color, "#112233");
        assert_eq!(config.theme.border_radius, "4px");
        assert_eq!(config.theme.text_color, "#ffffff");
        assert!(config.debug);
        assert_eq!(config.email.as_deref(), Some("hello@example.org"));
    }

    #[test]
    fn test_from_json_missing_bot_id() {
        let result = WidgetConfig::from_json(r#"{"apiUrl": "https://x.org"}"#);
        assert!(matches!(result, Err(WidgetError::Configuration(_))));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = WidgetConfig::from_json("not json");
        assert!(matches!(result, Err(WidgetError::Configuration(_))));
    }
}
