//! Scoped widget markup and stylesheet generation.
//!
//! Everything the widget injects lives under one CSS prefix so host-page
//! styles and ids cannot collide with it. Text that originates from the
//! backend or the visitor is never interpolated as markup; it goes through
//! [`escape_text`], and the only anchors we ever emit come from
//! [`linkify`]'s scheme allow-list.

use widget_core::{BotData, Position, WidgetConfig};

/// Single class-name prefix for every element the widget creates.
pub const CSS_PREFIX: &str = "npo-bots";

/// Marker id of the widget root. Exactly one per page.
pub const ROOT_ID: &str = "npo-bots-root";

/// URL schemes [`linkify`] will turn into anchors.
const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// The widget's mount payload: one root, one isolated stylesheet.
#[derive(Debug, Clone)]
pub struct WidgetMarkup {
    pub root_id: String,
    pub html: String,
    pub stylesheet: String,
}

/// Escape text for safe inclusion in markup.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `raw` and wrap bare http/https URLs in anchors.
///
/// Any other scheme (`javascript:`, `data:`, ...) stays plain escaped
/// text. This is the only place widget output may contain an element
/// derived from untrusted text.
pub fn linkify(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut first = true;

    for token in raw.split(' ') {
        if !first {
            out.push(' ');
        }
        first = false;

        let lowered = token.to_lowercase();
        if ALLOWED_SCHEMES.iter().any(|s| lowered.starts_with(s)) {
            let escaped = escape_text(token);
            out.push_str(&format!(
                r#"<a href="{0}" target="_blank" rel="noopener noreferrer">{0}</a>"#,
                escaped
            ));
        } else {
            out.push_str(&escape_text(token));
        }
    }

    out
}

/// Build the mount payload for the given configuration and bot data.
pub fn build_markup(config: &WidgetConfig, data: &BotData) -> WidgetMarkup {
    WidgetMarkup {
        root_id: ROOT_ID.to_string(),
        html: build_html(config, data),
        stylesheet: build_stylesheet(config),
    }
}

fn position_rules(position: Position) -> &'static str {
    match position {
        Position::BottomRight => "bottom: 20px; right: 20px;",
        Position::BottomLeft => "bottom: 20px; left: 20px;",
        Position::TopRight => "top: 20px; right: 20px;",
        Position::TopLeft => "top: 20px; left: 20px;",
    }
}

fn build_stylesheet(config: &WidgetConfig) -> String {
    let theme = &config.theme;
    let mut css = format!(
        r#"#{root} {{
  position: fixed;
  {position}
  z-index: 999999;
  font-family: {font_family};
  font-size: {font_size};
}}
#{root} .{p}-launcher {{
  background: {primary};
  color: {text};
  border: none;
  border-radius: 50%;
  width: 56px;
  height: 56px;
  cursor: pointer;
}}
#{root} .{p}-panel {{
  background: #ffffff;
  border-radius: {radius};
  box-shadow: 0 8px 24px rgba(0, 0, 0, 0.15);
  width: 340px;
  display: none;
}}
#{root} .{p}-header {{
  background: {primary};
  color: {text};
  border-radius: {radius} {radius} 0 0;
  padding: 14px 16px;
}}
#{root} .{p}-messages {{
  height: 320px;
  overflow-y: auto;
  padding: 12px;
}}
#{root} .{p}-message-bot {{
  background: #f3f4f6;
  border-radius: {radius};
  padding: 8px 12px;
  margin-bottom: 8px;
}}
#{root} .{p}-message-user {{
  background: {secondary};
  color: {text};
  border-radius: {radius};
  padding: 8px 12px;
  margin-bottom: 8px;
  margin-left: auto;
}}
#{root} .{p}-typing {{
  display: none;
  padding: 8px 12px;
  color: #6b7280;
}}
#{root} .{p}-actions button {{
  background: {primary};
  color: {text};
  border: none;
  border-radius: {radius};
  padding: 8px 12px;
  margin: 4px;
  cursor: pointer;
}}
#{root} .{p}-form-error {{
  display: none;
  color: #b91c1c;
  padding: 8px 12px;
}}
#{root} .{p}-input {{
  border-top: 1px solid #e5e7eb;
  padding: 10px;
}}
#{root} .{p}-branding {{
  font-size: 11px;
  color: #9ca3af;
  text-align: center;
  padding: 6px;
}}
"#,
        root = ROOT_ID,
        p = CSS_PREFIX,
        position = position_rules(config.position),
        font_family = theme.font_family,
        font_size = theme.font_size,
        primary = theme.primary_color,
        secondary = theme.secondary_color,
        text = theme.text_color,
        radius = theme.border_radius,
    );

    // Host overrides always load last so they win on equal specificity.
    if let Some(custom) = &config.custom_css {
        css.push('\n');
        css.push_str(custom);
        css.push('\n');
    }

    css
}

fn build_html(config: &WidgetConfig, data: &BotData) -> String {
    let p = CSS_PREFIX;
    let name = escape_text(&data.name);

    let mut actions = String::new();
    if data.volunteer_enabled {
        actions.push_str(&format!(
            r#"<button class="{p}-action-volunteer" type="button">Volunteer</button>"#
        ));
    }
    if data.donation_enabled {
        for amount in &data.donation_amounts {
            actions.push_str(&format!(
                r#"<button class="{p}-action-donate" type="button" data-amount="{amount}">${amount}</button>"#
            ));
        }
    }
    if data.email_enabled || data.email.is_some() {
        actions.push_str(&format!(
            r#"<button class="{p}-action-contact" type="button">Contact us</button>"#
        ));
    }
    if data.phone_enabled {
        if let Some(phone) = &data.phone {
            actions.push_str(&format!(
                r#"<button class="{p}-action-phone" type="button" data-phone="{}">Call us</button>"#,
                escape_text(phone)
            ));
        }
    }

    let input = if data.chat_enabled {
        format!(
            r#"<div class="{p}-input"><input class="{p}-input-field" type="text" placeholder="Type a message..." /></div>"#
        )
    } else {
        String::new()
    };

    let branding = if data.show_branding {
        format!(r#"<div class="{p}-branding">Powered by NPO Bots</div>"#)
    } else {
        String::new()
    };

    format!(
        r#"<div id="{root}" data-npo-bots-widget="true">
  <button class="{p}-launcher" type="button" aria-label="Open chat with {name}">&#128172;</button>
  <div class="{p}-panel" role="dialog" aria-label="Chat with {name}">
    <div class="{p}-header">{name}</div>
    <div class="{p}-messages"></div>
    <div class="{p}-typing">{name} is typing&#8230;</div>
    <div class="{p}-actions">{actions}</div>
    <div class="{p}-form-error"></div>
    {input}
    {branding}
  </div>
</div>"#,
        root = ROOT_ID,
        p = p,
        name = name,
        actions = actions,
        input = input,
        branding = branding,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use widget_core::BotData;

    fn config() -> WidgetConfig {
        WidgetConfig::builder("bot-1").build().unwrap()
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_text("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
    }

    #[test]
    fn test_linkify_allows_https_only() {
        let out = linkify("see https://example.org for details");
        assert!(out.contains(r#"<a href="https://example.org""#));
        assert!(out.contains("rel=\"noopener noreferrer\""));

        let out = linkify("click javascript:alert(1) now");
        assert!(!out.contains("<a "));
        assert!(out.contains("javascript:alert(1)"));
    }

    #[test]
    fn test_linkify_escapes_url_text() {
        let out = linkify(r#"https://example.org/a"onmouseover="x"#);
        assert!(!out.contains(r#""onmouseover"#));
        assert!(out.contains("&quot;onmouseover=&quot;x"));
    }

    #[test]
    fn test_every_class_is_prefixed() {
        let markup = build_markup(&config(), &BotData::fallback());

        for chunk in markup.html.split("class=\"").skip(1) {
            let class = chunk.split('"').next().unwrap();
            for name in class.split_whitespace() {
                assert!(
                    name.starts_with(CSS_PREFIX),
                    "unprefixed class: {}",
                    name
                );
            }
        }
    }

    #[test]
    fn test_single_root_with_marker() {
        let markup = build_markup(&config(), &BotData::fallback());
        assert_eq!(markup.root_id, ROOT_ID);
        assert_eq!(markup.html.matches(&format!("id=\"{}\"", ROOT_ID)).count(), 1);
        assert!(markup.html.contains("data-npo-bots-widget"));
    }

    #[test]
    fn test_bot_name_is_escaped() {
        let mut data = BotData::fallback();
        data.name = "<img src=x onerror=alert(1)>".to_string();

        let markup = build_markup(&config(), &data);
        assert!(!markup.html.contains("<img"));
        assert!(markup.html.contains("&lt;img"));
    }

    #[test]
    fn test_theme_flows_into_stylesheet() {
        let config = WidgetConfig::builder("bot-1")
            .primary_color("#123456")
            .border_radius("3px")
            .build()
            .unwrap();

        let markup = build_markup(&config, &BotData::fallback());
        assert!(markup.stylesheet.contains("#123456"));
        assert!(markup.stylesheet.contains("3px"));
    }

    #[test]
    fn test_custom_css_appended_last() {
        let config = WidgetConfig::builder("bot-1")
            .custom_css("#npo-bots-root { opacity: 0.9; }")
            .build()
            .unwrap();

        let markup = build_markup(&config, &BotData::fallback());
        let idx = markup.stylesheet.find("opacity: 0.9").unwrap();
        assert!(idx > markup.stylesheet.find(CSS_PREFIX).unwrap());
    }

    #[test]
    fn test_disabled_chat_omits_input() {
        let mut data = BotData::fallback();
        data.chat_enabled = false;

        let markup = build_markup(&config(), &data);
        assert!(!markup.html.contains("-input-field"));
    }

    #[test]
    fn test_donation_buttons_carry_amounts() {
        let markup = build_markup(&config(), &BotData::fallback());
        for amount in [25, 50, 100, 250] {
            assert!(markup.html.contains(&format!("data-amount=\"{}\"", amount)));
        }
    }
}
