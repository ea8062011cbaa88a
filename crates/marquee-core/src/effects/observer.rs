//! Shared visibility dispatcher.
//!
//! One observer serves every visibility-triggered behavior (reveals,
//! counters, typing, lazy images, in-view flags) instead of each behavior
//! keeping its own ad-hoc watcher. Callers register a region with a
//! threshold and a `once` flag; each frame the observer is fed the scroll
//! viewport and every region's span, and it emits Enter/Leave triggers.
//! `once` registrations detach after firing; the rest re-arm on leave.

/// Identifies an observed region: a whole section, or one item inside it
/// (a card, a stat, a gallery image). Item 0 is the section itself; items
/// are stored 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionKey {
    pub section: usize,
    item: usize,
}

impl RegionKey {
    /// Key for a whole section
    pub fn section(section: usize) -> Self {
        Self { section, item: 0 }
    }

    /// Key for the item at `index` inside a section
    pub fn item(section: usize, index: usize) -> Self {
        Self {
            section,
            item: index + 1,
        }
    }

    /// The item index, or `None` for a whole-section key
    pub fn item_index(&self) -> Option<usize> {
        self.item.checked_sub(1)
    }
}

/// Vertical extent of a region in page rows
#[derive(Debug, Clone, Copy)]
pub struct RegionSpan {
    pub top: u16,
    pub height: u16,
}

/// The visible slice of the page in page rows
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Scroll offset: first visible page row
    pub top: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub key: RegionKey,
    pub edge: Edge,
}

#[derive(Debug, Clone)]
struct Registration {
    key: RegionKey,
    /// Fraction of the region that must be visible to count as in view
    threshold: f64,
    /// Rows trimmed from the viewport bottom before testing visibility
    bottom_margin: u16,
    /// Detach after the first Enter
    once: bool,
    in_view: bool,
    detached: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewportObserver {
    registrations: Vec<Registration>,
}

/// Fraction of `span` visible inside `viewport`, after trimming
/// `bottom_margin` rows off the viewport bottom
pub fn visible_fraction(span: RegionSpan, viewport: Viewport, bottom_margin: u16) -> f64 {
    let view_top = u32::from(viewport.top);
    let view_bottom = view_top + u32::from(viewport.height.saturating_sub(bottom_margin));
    let span_top = u32::from(span.top);
    let span_bottom = span_top + u32::from(span.height);

    let overlap_top = span_top.max(view_top);
    let overlap_bottom = span_bottom.min(view_bottom);
    if overlap_bottom <= overlap_top {
        return 0.0;
    }

    if span.height == 0 {
        return 1.0;
    }
    f64::from(overlap_bottom - overlap_top) / f64::from(span.height)
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region; re-registering a key replaces the old entry
    pub fn register(&mut self, key: RegionKey, threshold: f64, bottom_margin: u16, once: bool) {
        self.registrations.retain(|r| r.key != key);
        self.registrations.push(Registration {
            key,
            threshold,
            bottom_margin,
            once,
            in_view: false,
            detached: false,
        });
    }

    /// Drop a registration
    pub fn unobserve(&mut self, key: RegionKey) {
        self.registrations.retain(|r| r.key != key);
    }

    pub fn is_observing(&self, key: RegionKey) -> bool {
        self.registrations
            .iter()
            .any(|r| r.key == key && !r.detached)
    }

    /// Scan every live registration against the current viewport.
    ///
    /// `span_of` maps a key to its current page span; a region that has no
    /// span (its element is gone) is simply skipped, never an error.
    pub fn scan<F>(&mut self, viewport: Viewport, span_of: F) -> Vec<Trigger>
    where
        F: Fn(RegionKey) -> Option<RegionSpan>,
    {
        let mut triggers = Vec::new();

        for reg in &mut self.registrations {
            if reg.detached {
                continue;
            }
            let Some(span) = span_of(reg.key) else {
                continue;
            };

            let fraction = visible_fraction(span, viewport, reg.bottom_margin);
            let in_view = if reg.threshold <= 0.0 {
                fraction > 0.0
            } else {
                fraction >= reg.threshold
            };

            if in_view && !reg.in_view {
                reg.in_view = true;
                triggers.push(Trigger {
                    key: reg.key,
                    edge: Edge::Enter,
                });
                if reg.once {
                    reg.detached = true;
                }
            } else if !in_view && reg.in_view {
                reg.in_view = false;
                triggers.push(Trigger {
                    key: reg.key,
                    edge: Edge::Leave,
                });
            }
        }

        self.registrations.retain(|r| !r.detached);
        triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(top: u16, height: u16) -> Viewport {
        Viewport { top, height }
    }

    fn span(top: u16, height: u16) -> RegionSpan {
        RegionSpan { top, height }
    }

    #[test]
    fn test_visible_fraction() {
        // Fully visible
        assert!((visible_fraction(span(10, 10), view(0, 40), 0) - 1.0).abs() < 0.001);
        // Half scrolled off the top
        assert!((visible_fraction(span(0, 10), view(5, 40), 0) - 0.5).abs() < 0.001);
        // Below the viewport
        assert!(visible_fraction(span(100, 10), view(0, 40), 0) < 0.001);
        // Bottom margin trims the viewport
        assert!(visible_fraction(span(38, 10), view(0, 40), 4) < 0.001);
    }

    #[test]
    fn test_enter_fires_at_threshold() {
        let mut observer = ViewportObserver::new();
        let key = RegionKey::section(0);
        observer.register(key, 0.5, 0, false);

        // 4 of 10 rows visible: below threshold
        let triggers = observer.scan(view(0, 40), |_| Some(span(36, 10)));
        assert!(triggers.is_empty());

        // 5 of 10 rows visible: at threshold
        let triggers = observer.scan(view(1, 40), |_| Some(span(36, 10)));
        assert_eq!(
            triggers,
            vec![Trigger {
                key,
                edge: Edge::Enter
            }]
        );

        // Still in view: no repeat trigger
        let triggers = observer.scan(view(2, 40), |_| Some(span(36, 10)));
        assert!(triggers.is_empty());
    }

    #[test]
    fn test_rearm_on_leave() {
        let mut observer = ViewportObserver::new();
        let key = RegionKey::item(1, 2);
        observer.register(key, 0.2, 0, false);

        let triggers = observer.scan(view(0, 40), |_| Some(span(10, 10)));
        assert_eq!(triggers[0].edge, Edge::Enter);

        let triggers = observer.scan(view(100, 40), |_| Some(span(10, 10)));
        assert_eq!(triggers[0].edge, Edge::Leave);

        let triggers = observer.scan(view(0, 40), |_| Some(span(10, 10)));
        assert_eq!(triggers[0].edge, Edge::Enter);
    }

    #[test]
    fn test_once_detaches_after_firing() {
        let mut observer = ViewportObserver::new();
        let key = RegionKey::section(3);
        observer.register(key, 0.1, 0, true);

        let triggers = observer.scan(view(0, 40), |_| Some(span(0, 10)));
        assert_eq!(triggers.len(), 1);
        assert!(!observer.is_observing(key));

        // Scrolling away and back produces nothing further
        let triggers = observer.scan(view(100, 40), |_| Some(span(0, 10)));
        assert!(triggers.is_empty());
        let triggers = observer.scan(view(0, 40), |_| Some(span(0, 10)));
        assert!(triggers.is_empty());
    }

    #[test]
    fn test_missing_span_is_inert() {
        let mut observer = ViewportObserver::new();
        observer.register(RegionKey::section(0), 0.1, 0, false);
        let triggers = observer.scan(view(0, 40), |_| None);
        assert!(triggers.is_empty());
        assert!(observer.is_observing(RegionKey::section(0)));
    }

    #[test]
    fn test_zero_threshold_needs_any_overlap() {
        let mut observer = ViewportObserver::new();
        let key = RegionKey::section(0);
        observer.register(key, 0.0, 0, false);

        let triggers = observer.scan(view(0, 40), |_| Some(span(40, 10)));
        assert!(triggers.is_empty());

        let triggers = observer.scan(view(1, 40), |_| Some(span(40, 10)));
        assert_eq!(triggers[0].edge, Edge::Enter);
    }
}
