//! Entrance animations for cards and section bodies.
//!
//! A reveal runs once, when the visibility observer first reports its
//! element in view. The renderer samples `phase_at` each frame and draws
//! the element dimmed and offset until it settles.

use std::time::Duration;

use crate::deck::RevealKind;
use crate::effects::easing::ease_in_out_quad;

/// Where a revealed element starts relative to its resting position,
/// in (columns, rows)
pub fn initial_offset(kind: RevealKind) -> (i16, i16) {
    match kind {
        RevealKind::FadeInUp => (0, 2),
        RevealKind::FadeInDown => (0, -2),
        RevealKind::SlideInLeft => (-6, 0),
        RevealKind::SlideInRight => (6, 0),
        RevealKind::ScaleIn => (0, 0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    /// Not started (still inside the per-element delay)
    Pending,
    /// Animating toward the resting position; progress is eased, in [0, 1]
    Entering { progress: f64 },
    /// At rest, rendered normally from here on
    Settled,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    kind: RevealKind,
    delay: Duration,
    duration: Duration,
}

impl Reveal {
    pub fn new(kind: RevealKind, delay: Duration, duration: Duration) -> Self {
        Self {
            kind,
            delay,
            duration,
        }
    }

    pub fn kind(&self) -> RevealKind {
        self.kind
    }

    /// Sample the animation at `elapsed` since the visibility trigger
    pub fn phase_at(&self, elapsed: Duration) -> RevealPhase {
        if elapsed < self.delay {
            return RevealPhase::Pending;
        }
        let active = elapsed - self.delay;
        if active >= self.duration {
            return RevealPhase::Settled;
        }
        let t = active.as_secs_f64() / self.duration.as_secs_f64();
        RevealPhase::Entering {
            progress: ease_in_out_quad(t),
        }
    }

    /// Current (column, row) offset from the resting position
    pub fn offset_at(&self, elapsed: Duration) -> (i16, i16) {
        match self.phase_at(elapsed) {
            RevealPhase::Pending => initial_offset(self.kind),
            RevealPhase::Entering { progress } => {
                let (col, row) = initial_offset(self.kind);
                let remaining = 1.0 - progress;
                (
                    (f64::from(col) * remaining).round() as i16,
                    (f64::from(row) * remaining).round() as i16,
                )
            }
            RevealPhase::Settled => (0, 0),
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
    fn test_delay_holds_pending() {
        let reveal = Reveal::new(RevealKind::FadeInUp, ms(100), ms(800));
        assert_eq!(reveal.phase_at(ms(0)), RevealPhase::Pending);
        assert_eq!(reveal.phase_at(ms(99)), RevealPhase::Pending);
        assert!(matches!(
            reveal.phase_at(ms(100)),
            RevealPhase::Entering { .. }
        ));
    }

    #[test]
    fn test_settles_after_duration() {
        let reveal = Reveal::new(RevealKind::ScaleIn, ms(0), ms(800));
        assert!(matches!(
            reveal.phase_at(ms(799)),
            RevealPhase::Entering { .. }
        ));
        assert_eq!(reveal.phase_at(ms(800)), RevealPhase::Settled);
        assert_eq!(reveal.phase_at(ms(10_000)), RevealPhase::Settled);
    }

    #[test]
    fn test_offset_shrinks_to_zero() {
        let reveal = Reveal::new(RevealKind::SlideInLeft, ms(0), ms(800));
        assert_eq!(reveal.offset_at(ms(0)), (-6, 0));
        let (mid_col, _) = reveal.offset_at(ms(400));
        assert!(mid_col > -6 && mid_col <= 0);
        assert_eq!(reveal.offset_at(ms(800)), (0, 0));
    }

    #[test]
    fn test_progress_is_eased() {
        let reveal = Reveal::new(RevealKind::FadeInUp, ms(0), ms(800));
        match reveal.phase_at(ms(80)) {
            RevealPhase::Entering { progress } => assert!(progress < 0.1),
            other => panic!("expected entering, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let reveal = Reveal::new(RevealKind::FadeInUp, ms(0), ms(0));
        assert_eq!(reveal.phase_at(ms(0)), RevealPhase::Settled);
    }
}
