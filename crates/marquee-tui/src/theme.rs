use ratatui::style::Color;

use marquee_core::config::{ThemeColorOverrides, ThemeConfig};

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,

    // Semantic colors
    pub accent: Color,
    pub active: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

impl Theme {
    pub fn gruvbox_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            active: Color::Rgb(0xd8, 0xa6, 0x57),
            muted: Color::Rgb(0x92, 0x83, 0x74),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
        }
    }

    pub fn nord() -> Self {
        Self {
            bg0: Color::Rgb(0x2e, 0x34, 0x40),
            bg1: Color::Rgb(0x3b, 0x42, 0x52),
            bg2: Color::Rgb(0x43, 0x4c, 0x5e),
            fg0: Color::Rgb(0xd8, 0xde, 0xe9),
            fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
            accent: Color::Rgb(0x88, 0xc0, 0xd0),
            active: Color::Rgb(0xeb, 0xcb, 0x8b),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),
            error: Color::Rgb(0xbf, 0x61, 0x6a),
            success: Color::Rgb(0xa3, 0xbe, 0x8c),
        }
    }

    pub fn one_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x2c, 0x34),
            bg1: Color::Rgb(0x2c, 0x31, 0x3a),
            bg2: Color::Rgb(0x3e, 0x44, 0x51),
            fg0: Color::Rgb(0xab, 0xb2, 0xbf),
            fg1: Color::Rgb(0xc8, 0xcc, 0xd4),
            accent: Color::Rgb(0x61, 0xaf, 0xef),
            active: Color::Rgb(0xe5, 0xc0, 0x7b),
            muted: Color::Rgb(0x5c, 0x63, 0x70),
            error: Color::Rgb(0xe0, 0x6c, 0x75),
            success: Color::Rgb(0x98, 0xc3, 0x79),
        }
    }

    /// Apply hex color overrides from configuration
    fn apply_overrides(mut self, overrides: &ThemeColorOverrides) -> Self {
        if let Some(c) = parse_hex(overrides.bg0.as_deref()) {
            self.bg0 = c;
        }
        if let Some(c) = parse_hex(overrides.bg1.as_deref()) {
            self.bg1 = c;
        }
        if let Some(c) = parse_hex(overrides.bg2.as_deref()) {
            self.bg2 = c;
        }
        if let Some(c) = parse_hex(overrides.fg0.as_deref()) {
            self.fg0 = c;
        }
        if let Some(c) = parse_hex(overrides.fg1.as_deref()) {
            self.fg1 = c;
        }
        if let Some(c) = parse_hex(overrides.accent.as_deref()) {
            self.accent = c;
        }
        if let Some(c) = parse_hex(overrides.active.as_deref()) {
            self.active = c;
        }
        if let Some(c) = parse_hex(overrides.muted.as_deref()) {
            self.muted = c;
        }
        if let Some(c) = parse_hex(overrides.error.as_deref()) {
            self.error = c;
        }
        if let Some(c) = parse_hex(overrides.success.as_deref()) {
            self.success = c;
        }
        self
    }
}

/// Build the runtime theme from configuration
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.as_str() {
        "nord" => Theme::nord(),
        "one-dark" => Theme::one_dark(),
        "gruvbox-dark" => Theme::gruvbox_dark(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::gruvbox_dark()
        }
    };
    base.apply_overrides(&config.colors)
}

/// Parse a hex color string ("#rrggbb" or "rrggbb")
fn parse_hex(value: Option<&str>) -> Option<Color> {
    let value = value?.trim().trim_start_matches('#');
    if value.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&value[0..2], 16).ok()?;
    let g = u8::from_str_radix(&value[2..4], 16).ok()?;
    let b = u8::from_str_radix(&value[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex(Some("#ff8800")), Some(Color::Rgb(0xff, 0x88, 0x00)));
        assert_eq!(parse_hex(Some("ff8800")), Some(Color::Rgb(0xff, 0x88, 0x00)));
        assert_eq!(parse_hex(Some("xyz")), None);
        assert_eq!(parse_hex(None), None);
    }

    #[test]
    fn test_overrides_applied() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#123456".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(theme.bg0, Theme::nord().bg0);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        let theme = load_theme(&config);
        assert_eq!(theme.bg0, Theme::gruvbox_dark().bg0);
    }
}
