//! Header bar behavior: hide on scroll-down, show on scroll-up, condense
//! past a scroll threshold, and highlight the nav link whose section
//! currently fills the view.

use crate::effects::observer::{visible_fraction, RegionSpan, Viewport};

#[derive(Debug, Clone)]
pub struct HeaderState {
    last_scroll: u16,
    hidden: bool,
    condensed: bool,
    /// Scroll offset past which the condensed style applies
    condense_after: u16,
}

impl HeaderState {
    pub fn new(condense_after: u16) -> Self {
        Self {
            last_scroll: 0,
            hidden: false,
            condensed: false,
            condense_after,
        }
    }

    /// Feed the current scroll offset; direction decides visibility
    pub fn update(&mut self, scroll: u16) {
        if scroll > self.condense_after {
            self.condensed = true;
            if scroll > self.last_scroll {
                self.hidden = true;
            } else if scroll < self.last_scroll {
                self.hidden = false;
            }
        } else {
            self.condensed = false;
            self.hidden = false;
        }
        self.last_scroll = scroll;
    }

    /// Header is translated out of view
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Header shows its condensed ("scrolled") style
    pub fn is_condensed(&self) -> bool {
        self.condensed
    }

    /// Force the header visible (e.g. while the menu overlay is open)
    pub fn reveal(&mut self) {
        self.hidden = false;
    }
}

/// The nav link to highlight: the last section whose visible fraction
/// meets the threshold. At most one link is active at a time.
pub fn active_section(
    viewport: Viewport,
    spans: &[(usize, RegionSpan)],
    threshold: f64,
) -> Option<usize> {
    let mut active = None;
    for &(idx, span) in spans {
        if visible_fraction(span, viewport, 0) >= threshold {
            active = Some(idx);
        }
    }
    active
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hides_on_scroll_down_past_threshold() {
        let mut header = HeaderState::new(5);
        header.update(3);
        assert!(!header.is_hidden());
        assert!(!header.is_condensed());

        header.update(10);
        assert!(header.is_hidden());
        assert!(header.is_condensed());
    }

    #[test]
    fn test_shows_on_scroll_up() {
        let mut header = HeaderState::new(5);
        header.update(20);
        header.update(30);
        assert!(header.is_hidden());

        header.update(25);
        assert!(!header.is_hidden());
        assert!(header.is_condensed());
    }

    #[test]
    fn test_resets_near_top() {
        let mut header = HeaderState::new(5);
        header.update(30);
        assert!(header.is_hidden());

        header.update(2);
        assert!(!header.is_hidden());
        assert!(!header.is_condensed());
    }

    #[test]
    fn test_unchanged_scroll_keeps_state() {
        let mut header = HeaderState::new(5);
        header.update(10);
        header.update(20);
        assert!(header.is_hidden());
        header.update(20);
        assert!(header.is_hidden());
    }

    #[test]
    fn test_active_section_picks_last_qualifying() {
        let viewport = Viewport { top: 0, height: 40 };
        let spans = [
            (0, RegionSpan { top: 0, height: 20 }),
            (1, RegionSpan { top: 20, height: 20 }),
            (2, RegionSpan { top: 40, height: 20 }),
        ];
        assert_eq!(active_section(viewport, &spans, 0.5), Some(1));
    }

    #[test]
    fn test_active_section_none_when_nothing_qualifies() {
        let viewport = Viewport { top: 0, height: 10 };
        let spans = [(0, RegionSpan { top: 100, height: 20 })];
        assert_eq!(active_section(viewport, &spans, 0.5), None);
    }
}
