//! Key bindings.
//!
//! Config values use vim notation: a bare character ("j", "G", "?"), or a
//! bracketed name with an optional modifier ("<C-d>", "<S-Tab>", "<CR>").
//! Everything resolves through one flat map; the only multi-key sequence
//! is "gg", which the input layer completes with its pending-key state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use marquee_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// A single resolvable key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action fired by the second press of a "gg" sequence
    pending_g_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Build the lookup map from config. The first binding of a key wins;
    /// later conflicts are logged and dropped so a bad config degrades to
    /// "one of the two actions works" instead of failing startup.
    pub fn from_config(config: &KeymapConfig) -> Self {
        let entries = [
            (config.quit.as_str(), Action::Quit),
            (config.scroll_down.as_str(), Action::ScrollDown),
            (config.scroll_up.as_str(), Action::ScrollUp),
            (config.scroll_half_down.as_str(), Action::ScrollHalfPageDown),
            (config.scroll_half_up.as_str(), Action::ScrollHalfPageUp),
            (config.scroll_page_down.as_str(), Action::ScrollPageDown),
            (config.scroll_page_up.as_str(), Action::ScrollPageUp),
            (config.jump_to_top.as_str(), Action::JumpToTop),
            (config.jump_to_bottom.as_str(), Action::JumpToBottom),
            (config.next_section.as_str(), Action::NextSection),
            (config.prev_section.as_str(), Action::PrevSection),
            (config.slider_next.as_str(), Action::SliderNext),
            (config.slider_prev.as_str(), Action::SliderPrev),
            (config.toggle_menu.as_str(), Action::ToggleMenu),
            (config.open_link.as_str(), Action::OpenLink),
            (config.help.as_str(), Action::Help),
        ];

        let mut bindings = HashMap::new();
        let mut pending_g_action = None;

        for (spec, action) in entries {
            if spec == "gg" {
                pending_g_action = Some(action);
                continue;
            }
            let Some(binding) = parse_key_binding(spec) else {
                warn!("Ignoring unparseable key binding '{}' for {:?}", spec, action);
                continue;
            };
            match bindings.entry(binding) {
                Entry::Occupied(slot) => {
                    warn!(
                        "'{}' is already bound to {:?}, dropping binding to {:?}",
                        spec,
                        slot.get(),
                        action
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(action);
                }
            }
        }

        // Not configurable: Ctrl+C always quits, Escape always leaves an
        // overlay, and the arrow keys stay usable as fallbacks
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);
        for (code, action) in [
            (KeyCode::Up, Action::ScrollUp),
            (KeyCode::Down, Action::ScrollDown),
            (KeyCode::Left, Action::SliderPrev),
            (KeyCode::Right, Action::SliderNext),
        ] {
            bindings.entry(KeyBinding::simple(code)).or_insert(action);
        }

        Self {
            bindings,
            pending_g_action,
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// The action a completed "gg" sequence triggers
    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.pending_g_action.as_ref()
    }

    /// Whether a lone 'g' press should wait for a second one
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.pending_g_action.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse one vim-notation key spec into a binding
pub fn parse_key_binding(spec: &str) -> Option<KeyBinding> {
    let spec = spec.trim();

    if let Some(inner) = spec.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        let (modifiers, name) = if let Some(rest) = inner.strip_prefix("C-") {
            (KeyModifiers::CONTROL, rest)
        } else if let Some(rest) = inner.strip_prefix("S-") {
            (KeyModifiers::SHIFT, rest)
        } else if let Some(rest) = inner.strip_prefix("A-").or_else(|| inner.strip_prefix("M-")) {
            (KeyModifiers::ALT, rest)
        } else {
            (KeyModifiers::NONE, inner)
        };
        return named_key(name).map(|code| KeyBinding::new(code, modifiers));
    }

    // A bare character; uppercase means Shift is held
    let mut chars = spec.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(KeyBinding::shift(KeyCode::Char(c))),
        (Some(c), None) => Some(KeyBinding::simple(KeyCode::Char(c))),
        _ => None,
    }
}

/// A key name as it appears inside `<...>`
fn named_key(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        other => {
            // Single character after a modifier, e.g. the "d" in "<C-d>"
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        let cases = [
            ("j", Some(KeyBinding::simple(KeyCode::Char('j')))),
            ("?", Some(KeyBinding::simple(KeyCode::Char('?')))),
            ("G", Some(KeyBinding::shift(KeyCode::Char('G')))),
            ("<C-d>", Some(KeyBinding::ctrl(KeyCode::Char('d')))),
            ("<C-D>", Some(KeyBinding::ctrl(KeyCode::Char('d')))),
            ("<CR>", Some(KeyBinding::simple(KeyCode::Enter))),
            ("<Esc>", Some(KeyBinding::simple(KeyCode::Esc))),
            ("<Tab>", Some(KeyBinding::simple(KeyCode::Tab))),
            ("<S-Tab>", Some(KeyBinding::shift(KeyCode::Tab))),
            (
                "<A-x>",
                Some(KeyBinding::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            ),
            ("ctrl-j", None),
            ("<X-j>", None),
            ("", None),
        ];
        for (spec, expected) in cases {
            assert_eq!(parse_key_binding(spec), expected, "spec {:?}", spec);
        }
    }

    #[test]
    fn test_keymap_from_default_config() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(&Action::ScrollDown)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('d'))),
            Some(&Action::ScrollHalfPageDown)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('m'))),
            Some(&Action::ToggleMenu)
        );

        // "gg" never lands in the flat map
        assert!(keymap.is_g_prefix(&KeyBinding::simple(KeyCode::Char('g'))));
        assert_eq!(keymap.get_pending_g_action(), Some(&Action::JumpToTop));
        assert_eq!(keymap.get(&KeyBinding::simple(KeyCode::Char('g'))), None);
    }

    #[test]
    fn test_hardcoded_bindings_survive_config() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Esc)),
            Some(&Action::ExitMode)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Right)),
            Some(&Action::SliderNext)
        );
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            scroll_up: "j".to_string(), // collides with scroll_down
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(&Action::ScrollDown)
        );
    }
}
