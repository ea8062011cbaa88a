use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    // Anchor navigation between sections
    NextSection,
    PrevSection,
    NavGoto(usize), // Jump to the nav link's section
    // Showcase slider
    SliderNext,
    SliderPrev,
    SliderGoto(usize), // 1-based, from dot clicks and number keys
    // Nav menu overlay
    ToggleMenu,
    CloseMenu,
    MenuUp,
    MenuDown,
    MenuSelect,
    // Contact links
    OpenLink,
    OpenUrl(String),
    Help,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Any key closes the help overlay
    if app.mode == Mode::Help {
        return Action::ExitMode;
    }

    // The open menu owns the keyboard
    if app.menu.is_open() {
        return handle_menu_mode(key);
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    // Number keys jump straight to a slide (1-based, like dot clicks)
    if let KeyCode::Char(c) = key.code {
        if key.modifiers == KeyModifiers::NONE {
            if let Some(digit) = c.to_digit(10) {
                if digit > 0 {
                    return Action::SliderGoto(digit as usize);
                }
            }
        }
    }

    // gg requires a double press
    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            return keymap
                .get_pending_g_action()
                .cloned()
                .unwrap_or(Action::None);
        }
        return Action::PendingG;
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Key handling while the nav menu overlay is open
fn handle_menu_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::CloseMenu,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::CloseMenu,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MenuDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MenuUp,
        (KeyCode::Enter, _) => Action::MenuSelect,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use marquee_core::{AppConfig, Deck};

    fn test_app() -> App {
        let deck: Deck = toml::from_str(
            r#"
            [meta]
            title = "t"
            brand = "b"
            "#,
        )
        .unwrap();
        App::new(deck, std::path::PathBuf::from("."), AppConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = test_app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &app, &keymap),
            Action::ScrollDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('m')), &app, &keymap),
            Action::ToggleMenu
        );
    }

    #[test]
    fn test_digits_map_to_slides() {
        let app = test_app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('3')), &app, &keymap),
            Action::SliderGoto(3)
        );
        // '0' is not a slide
        assert_eq!(
            handle_key_event(key(KeyCode::Char('0')), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = test_app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('g')), &app, &keymap),
            Action::PendingG
        );
        app.pending_key = Some('g');
        assert_eq!(
            handle_key_event(key(KeyCode::Char('g')), &app, &keymap),
            Action::JumpToTop
        );
    }

    #[test]
    fn test_menu_mode_captures_keys() {
        let mut app = test_app();
        let keymap = Keymap::default();
        app.menu.open(std::time::Instant::now());

        assert_eq!(
            handle_key_event(key(KeyCode::Esc), &app, &keymap),
            Action::CloseMenu
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &app, &keymap),
            Action::MenuDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &app, &keymap),
            Action::MenuSelect
        );
    }

    #[test]
    fn test_help_mode_exits_on_any_key() {
        let mut app = test_app();
        let keymap = Keymap::default();
        app.mode = Mode::Help;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x')), &app, &keymap),
            Action::ExitMode
        );
    }
}
