use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::effects::easing::EasingKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ui: UiConfig::default(),
            slider: SliderConfig::default(),
            effects: EffectsConfig::default(),
            keymap: KeymapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Scroll and anchor motion
    #[serde(default)]
    pub motion: MotionConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            motion: MotionConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Smooth scrolling and anchor navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Enable smooth scrolling (instant jumps when false)
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Anchor navigation duration in milliseconds
    #[serde(default = "default_anchor_duration")]
    pub anchor_duration_ms: u64,
    /// Key/wheel scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: u64,
    /// Easing curve for scroll motion
    #[serde(default = "default_easing")]
    pub easing: EasingKind,
    /// Animation frame rate while motion is pending
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
    /// Rows moved per scroll key press when smooth scrolling is off
    #[serde(default = "default_scroll_rows")]
    pub scroll_rows: u16,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            anchor_duration_ms: default_anchor_duration(),
            scroll_duration_ms: default_scroll_duration(),
            easing: default_easing(),
            animation_fps: default_animation_fps(),
            scroll_rows: default_scroll_rows(),
        }
    }
}

/// Showcase slider behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Auto-advance interval in milliseconds (0 = disabled)
    #[serde(default = "default_auto_advance")]
    pub auto_advance_ms: u64,
    /// Minimum drag distance in cells before a release counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: u16,
    /// Allow changing slides by dragging with the mouse
    #[serde(default = "default_true")]
    pub mouse_drag: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: default_auto_advance(),
            swipe_threshold: default_swipe_threshold(),
            mouse_drag: default_true(),
        }
    }
}

/// Scroll-driven page effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Entrance reveal duration in milliseconds
    #[serde(default = "default_reveal_duration")]
    pub reveal_duration_ms: u64,
    /// Fraction of an element that must be visible before it reveals
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,
    /// Rows trimmed from the viewport bottom when testing reveal visibility
    #[serde(default = "default_reveal_bottom_margin")]
    pub reveal_bottom_margin_rows: u16,
    /// Visibility fraction for generic observed actions
    #[serde(default = "default_observe_threshold")]
    pub observe_threshold: f64,
    /// Counter animation duration in milliseconds
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    /// Counter animation step in milliseconds
    #[serde(default = "default_counter_step")]
    pub counter_step_ms: u64,
    /// Default typing speed in milliseconds per character
    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms: u64,
    /// Minimum terminal width for parallax decorations
    #[serde(default = "default_parallax_min_width")]
    pub parallax_min_width: u16,
    /// Scroll offset in rows after which the header condenses
    #[serde(default = "default_header_condense")]
    pub header_condense_after_rows: u16,
    /// Fraction of a section that must be visible for its nav link to light up
    #[serde(default = "default_section_link_threshold")]
    pub section_link_threshold: f64,
    /// Delay between menu items when the overlay opens, in milliseconds
    #[serde(default = "default_menu_stagger")]
    pub menu_stagger_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            reveal_duration_ms: default_reveal_duration(),
            reveal_threshold: default_reveal_threshold(),
            reveal_bottom_margin_rows: default_reveal_bottom_margin(),
            observe_threshold: default_observe_threshold(),
            counter_duration_ms: default_counter_duration(),
            counter_step_ms: default_counter_step(),
            typing_speed_ms: default_typing_speed(),
            parallax_min_width: default_parallax_min_width(),
            header_condense_after_rows: default_header_condense(),
            section_link_threshold: default_section_link_threshold(),
            menu_stagger_ms: default_menu_stagger(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Primary background
    pub bg0: Option<String>,
    /// Secondary background (slightly lighter)
    pub bg1: Option<String>,
    /// Tertiary background (selection, highlights)
    pub bg2: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Secondary foreground (slightly dimmer)
    pub fg1: Option<String>,
    /// Accent color
    pub accent: Option<String>,
    /// Active nav link / indicator dot color
    pub active: Option<String>,
    /// Muted text (captions, hints, not-yet-revealed content)
    pub muted: Option<String>,
    /// Error color
    pub error: Option<String>,
    /// Success color
    pub success: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,

    /// Scroll down one step
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// Scroll up one step
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Scroll half page down
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    /// Scroll full page down
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    /// Scroll full page up
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to the top of the page
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to the bottom of the page
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    /// Animate to the next section anchor
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Animate to the previous section anchor
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,

    /// Next slide in the showcase slider
    #[serde(default = "default_key_slider_next")]
    pub slider_next: String,
    /// Previous slide in the showcase slider
    #[serde(default = "default_key_slider_prev")]
    pub slider_prev: String,

    /// Toggle the nav menu overlay
    #[serde(default = "default_key_toggle_menu")]
    pub toggle_menu: String,
    /// Open the focused contact link in the browser
    #[serde(default = "default_key_open_link")]
    pub open_link: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            slider_next: default_key_slider_next(),
            slider_prev: default_key_slider_prev(),
            toggle_menu: default_key_toggle_menu(),
            open_link: default_key_open_link(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_section() -> String { "<Tab>".to_string() }
fn default_key_prev_section() -> String { "<S-Tab>".to_string() }
fn default_key_slider_next() -> String { "l".to_string() }
fn default_key_slider_prev() -> String { "h".to_string() }
fn default_key_toggle_menu() -> String { "m".to_string() }
fn default_key_open_link() -> String { "<CR>".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_anchor_duration() -> u64 {
    800
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_easing() -> EasingKind {
    EasingKind::EaseInOut
}

fn default_animation_fps() -> u16 {
    60
}

fn default_scroll_rows() -> u16 {
    1
}

fn default_auto_advance() -> u64 {
    4000 // change slide every 4 seconds
}

fn default_swipe_threshold() -> u16 {
    8
}

fn default_reveal_duration() -> u64 {
    800
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_bottom_margin() -> u16 {
    2
}

fn default_observe_threshold() -> f64 {
    0.2
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_counter_step() -> u64 {
    16
}

fn default_typing_speed() -> u64 {
    50
}

fn default_parallax_min_width() -> u16 {
    80
}

fn default_header_condense() -> u16 {
    5
}

fn default_section_link_threshold() -> f64 {
    0.5
}

fn default_menu_stagger() -> u64 {
    100
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/marquee/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marquee")
            .join("config.toml")
    }
}
