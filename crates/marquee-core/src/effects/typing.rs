//! Typewriter reveal for hero headlines.

use std::time::Duration;

/// Reveals text one character per interval once its section first becomes
/// visible. One-shot: the caller records the start instant on the first
/// visibility trigger and never re-arms it.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Character boundaries, so multibyte text never splits mid-char
    char_count: usize,
    interval: Duration,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            interval,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Number of characters revealed after `elapsed` time
    pub fn chars_at(&self, elapsed: Duration) -> usize {
        if self.interval.is_zero() {
            return self.char_count;
        }
        let revealed = (elapsed.as_millis() / self.interval.as_millis()) as usize;
        revealed.min(self.char_count)
    }

    /// The visible prefix after `elapsed` time
    pub fn visible_at(&self, elapsed: Duration) -> &str {
        let chars = self.chars_at(elapsed);
        match self.text.char_indices().nth(chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.chars_at(elapsed) >= self.char_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_reveals_one_char_per_interval() {
        let tw = Typewriter::new("hello", ms(50));
        assert_eq!(tw.visible_at(ms(0)), "");
        assert_eq!(tw.visible_at(ms(49)), "");
        assert_eq!(tw.visible_at(ms(50)), "h");
        assert_eq!(tw.visible_at(ms(149)), "he");
        assert_eq!(tw.visible_at(ms(250)), "hello");
        assert!(tw.is_done(ms(250)));
    }

    #[test]
    fn test_never_reveals_past_end() {
        let tw = Typewriter::new("hi", ms(50));
        assert_eq!(tw.visible_at(ms(60_000)), "hi");
        assert_eq!(tw.chars_at(ms(60_000)), 2);
    }

    #[test]
    fn test_multibyte_boundaries() {
        let tw = Typewriter::new("héllo wörld", ms(10));
        for t in (0..200).step_by(10) {
            let prefix = tw.visible_at(ms(t));
            assert!(tw.full_text().starts_with(prefix));
        }
        assert_eq!(tw.visible_at(ms(20)), "hé");
    }

    #[test]
    fn test_zero_interval_shows_everything() {
        let tw = Typewriter::new("abc", ms(0));
        assert_eq!(tw.visible_at(ms(0)), "abc");
        assert!(tw.is_done(ms(0)));
    }

    #[test]
    fn test_empty_text() {
        let tw = Typewriter::new("", ms(50));
        assert_eq!(tw.visible_at(ms(0)), "");
        assert!(tw.is_done(ms(0)));
    }
}
