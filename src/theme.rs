//! Application theme
//!
//! Resolves the hex strings in `[ui.colors]` into ratatui colors once at
//! startup so views never parse config at draw time.

use crate::config::{UiColors, UiConfig};
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Every color the views draw with
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub failure: Color,
    pub timer: Color,
    pub timer_low: Color,
    pub border_type: BorderType,
}

/// Convert hex string to ratatui Color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

fn border_type_from_name(name: &str) -> BorderType {
    match name.to_lowercase().as_str() {
        "double" => BorderType::Double,
        "rounded" => BorderType::Rounded,
        "thick" => BorderType::Thick,
        _ => BorderType::Plain,
    }
}

impl AppTheme {
    pub fn from_config(ui: &UiConfig) -> Self {
        let fallback = UiColors::default();
        let c = &ui.colors;
        let pick = |value: &str, default: &str, name: &str| {
            hex_to_color(value).unwrap_or_else(|| {
                tracing::warn!("Invalid color '{}' for ui.colors.{}, using default", value, name);
                hex_to_color(default).unwrap_or(Color::White)
            })
        };

        Self {
            accent: pick(&c.accent, &fallback.accent, "accent"),
            text: pick(&c.text, &fallback.text, "text"),
            muted: pick(&c.muted, &fallback.muted, "muted"),
            success: pick(&c.success, &fallback.success, "success"),
            failure: pick(&c.failure, &fallback.failure, "failure"),
            timer: pick(&c.timer, &fallback.timer, "timer"),
            timer_low: pick(&c.timer_low, &fallback.timer_low, "timer_low"),
            border_type: border_type_from_name(&ui.border_style),
        }
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}
