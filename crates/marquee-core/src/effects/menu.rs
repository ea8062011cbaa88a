//! Nav menu overlay state.
//!
//! Open and close are idempotent and mutually exclusive. While the overlay
//! is open the page scroll is locked, and menu items appear one after
//! another with a fixed stagger.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuPhase {
    Closed,
    Open { since: Instant },
}

#[derive(Debug, Clone)]
pub struct MenuOverlay {
    phase: MenuPhase,
    stagger: Duration,
}

impl MenuOverlay {
    pub fn new(stagger: Duration) -> Self {
        Self {
            phase: MenuPhase::Closed,
            stagger,
        }
    }

    pub fn open(&mut self, now: Instant) {
        if let MenuPhase::Closed = self.phase {
            self.phase = MenuPhase::Open { since: now };
        }
    }

    /// Close, whether triggered by Escape, a click outside the menu, or a
    /// link activation
    pub fn close(&mut self) {
        self.phase = MenuPhase::Closed;
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.phase {
            MenuPhase::Closed => self.open(now),
            MenuPhase::Open { .. } => self.close(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, MenuPhase::Open { .. })
    }

    /// Page scroll input is swallowed while the overlay is up
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Whether the item at `index` has staggered in yet
    pub fn item_visible(&self, index: usize, now: Instant) -> bool {
        match self.phase {
            MenuPhase::Closed => false,
            MenuPhase::Open { since } => {
                let delay = self.stagger.saturating_mul(index as u32);
                now.saturating_duration_since(since) >= delay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_toggle_open_close() {
        let mut menu = MenuOverlay::new(ms(100));
        let t0 = Instant::now();
        assert!(!menu.is_open());

        menu.toggle(t0);
        assert!(menu.is_open());
        assert!(menu.scroll_locked());

        menu.toggle(t0);
        assert!(!menu.is_open());
        assert!(!menu.scroll_locked());
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut menu = MenuOverlay::new(ms(100));
        let t0 = Instant::now();
        menu.open(t0);
        // Re-opening later must not restart the stagger clock
        menu.open(t0 + ms(500));
        assert!(menu.item_visible(3, t0 + ms(500)));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut menu = MenuOverlay::new(ms(100));
        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_and_outside_click_close() {
        let mut menu = MenuOverlay::new(ms(100));
        let t0 = Instant::now();

        menu.open(t0);
        menu.close(); // Escape
        assert!(!menu.is_open());

        menu.open(t0);
        menu.close(); // click outside the menu content
        assert!(!menu.is_open());
    }

    #[test]
    fn test_items_stagger_in() {
        let mut menu = MenuOverlay::new(ms(100));
        let t0 = Instant::now();
        menu.open(t0);

        assert!(menu.item_visible(0, t0));
        assert!(!menu.item_visible(1, t0));
        assert!(!menu.item_visible(1, t0 + ms(99)));
        assert!(menu.item_visible(1, t0 + ms(100)));
        assert!(menu.item_visible(4, t0 + ms(400)));
    }

    #[test]
    fn test_closed_menu_shows_nothing() {
        let menu = MenuOverlay::new(ms(100));
        assert!(!menu.item_visible(0, Instant::now()));
    }
}
