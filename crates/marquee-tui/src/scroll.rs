//! Smooth page scrolling.
//!
//! One animator owns the page scroll position. Key and wheel input feeds
//! deltas that are batched within a frame; anchor navigation starts a
//! longer eased glide to an absolute row. Every position change flows
//! through `update()`, called once per frame with the current time.

use std::time::{Duration, Instant};

use marquee_core::config::MotionConfig;
use marquee_core::effects::easing::EasingKind;
use marquee_core::effects::timing::{is_complete, lerp_u16, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingKind,
}

/// Scroll animation controller
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: MotionConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events per frame
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
        }
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.scroll_duration_ms > 0
    }

    /// Check if there's pending work (animation or pending delta).
    /// Use this to decide whether the event loop needs the fast tick.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    /// Get the current interpolated scroll position
    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Glide to an anchor row over the configured anchor duration
    pub fn scroll_to_anchor(&mut self, target: u16, max_scroll: u16, now: Instant) {
        self.start_glide(
            target,
            max_scroll,
            Duration::from_millis(self.config.anchor_duration_ms),
            now,
        );
    }

    fn start_glide(&mut self, target: u16, max_scroll: u16, duration: Duration, now: Instant) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.smooth_enabled {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        let from = self.current_scroll;
        if from == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration,
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta amount (positive = down, negative = up).
    ///
    /// Multiple scroll events within the same frame are batched together
    /// for smoother handling of rapid key presses.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.is_smooth() {
            let new_scroll = (i32::from(self.current_scroll) + delta)
                .clamp(0, i32::from(max_scroll)) as u16;
            self.current_scroll = new_scroll;
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        let rows = if self.is_smooth() {
            1
        } else {
            i32::from(self.config.scroll_rows)
        };
        self.scroll_by(rows, max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: u16) {
        let rows = if self.is_smooth() {
            1
        } else {
            i32::from(self.config.scroll_rows)
        };
        self.scroll_by(-rows, max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(i32::from((viewport_height / 2).max(1)), max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-i32::from((viewport_height / 2).max(1)), max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(i32::from(viewport_height), max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-i32::from(viewport_height), max_scroll);
    }

    /// Update animation state and return the current scroll position.
    /// Call once per frame.
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        // Process any pending scroll delta
        if self.pending_delta != 0 {
            let target = self.target_scroll();
            let new_target = (i32::from(target) + self.pending_delta)
                .clamp(0, i32::from(max_scroll)) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current_scroll,
                    to: new_target,
                    duration: Duration::from_millis(self.config.scroll_duration_ms),
                    easing: self.config.easing,
                });
            } else {
                self.animation = None;
            }
        }

        // Update active animation
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration, now);
                let eased_t = anim.easing.apply(t);
                self.current_scroll = lerp_u16(anim.from, anim.to, eased_t).min(max_scroll);
            }
        }

        self.current_scroll
    }

    /// Cancel any active animation and stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn smooth_config() -> MotionConfig {
        MotionConfig {
            smooth_enabled: true,
            anchor_duration_ms: 800,
            scroll_duration_ms: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = MotionConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to_anchor(100, 200, Instant::now());
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_anchor_glide_interpolates() {
        let mut animator = ScrollAnimator::new(smooth_config());
        let t0 = Instant::now();

        animator.scroll_to_anchor(100, 200, t0);
        assert!(animator.needs_update());
        assert_eq!(animator.target_scroll(), 100);

        let mid = animator.update(200, t0 + ms(400));
        assert!(mid > 0 && mid < 100, "mid-flight position: {}", mid);

        assert_eq!(animator.update(200, t0 + ms(800)), 100);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth_config());
        let t0 = Instant::now();

        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);

        animator.update(200, t0);
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_scroll_clamps_to_max() {
        let mut animator = ScrollAnimator::new(smooth_config());
        let t0 = Instant::now();
        animator.set_scroll(50);
        animator.scroll_to_anchor(300, 100, t0);
        animator.update(100, t0 + ms(1000));
        assert_eq!(animator.current_scroll(), 100);
    }

    #[test]
    fn test_scroll_up_never_goes_negative() {
        let mut animator = ScrollAnimator::new(smooth_config());
        let t0 = Instant::now();
        animator.scroll_by(-50, 200);
        animator.update(200, t0 + ms(1000));
        assert_eq!(animator.current_scroll(), 0);
    }

    #[test]
    fn test_anchor_to_current_position_is_noop() {
        let mut animator = ScrollAnimator::new(smooth_config());
        let t0 = Instant::now();
        animator.set_scroll(40);
        animator.scroll_to_anchor(40, 100, t0);
        assert!(!animator.needs_update());
    }
}
