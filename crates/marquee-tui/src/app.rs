use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use marquee_core::config::AppConfig;
use marquee_core::deck::{Deck, ObserveAction, SectionBody};
use marquee_core::effects::{
    CounterAnimation, Edge, HeaderState, MenuOverlay, RegionKey, Reveal, Trigger, Typewriter,
    Viewport, ViewportObserver,
};
use marquee_core::slider::{DragOutcome, DragTracker, SliderController};

use crate::assets::ImageStore;
use crate::event::ImageLoadResult;
use crate::input::Action;
use crate::layout::PageLayout;
use crate::scroll::ScrollAnimator;
use crate::theme::{load_theme, Theme};

/// Rows the header bar overlays at the top of the screen
pub const HEADER_ROWS: u16 = 2;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// What a visibility trigger means for a given region
#[derive(Debug, Clone)]
enum Binding {
    /// Start the hero typewriter
    Typing,
    /// Start a card's entrance animation
    CardReveal,
    /// Generic observed action on a stat
    Stat { observe: ObserveAction, target: u64 },
    /// Decode a gallery image
    Image { src: PathBuf },
}

/// Clickable screen regions, rebuilt by the widgets on every draw
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub menu_button: Option<Rect>,
    /// Header nav link rects with their nav indices
    pub header_links: Vec<(Rect, usize)>,
    pub menu_panel: Option<Rect>,
    pub menu_items: Vec<(Rect, usize)>,
    pub slider: Option<Rect>,
    /// Indicator dot rects with their 0-based slide indices
    pub dots: Vec<(Rect, usize)>,
    /// Contact link rects with their target URLs
    pub contact_links: Vec<(Rect, String)>,
}

impl HitAreas {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Application state
pub struct App {
    pub deck: Deck,
    pub config: AppConfig,
    pub theme: Theme,
    pub mode: Mode,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    pub should_quit: bool,
    pub status_message: Option<String>,

    pub slider: SliderController,
    drag: DragTracker,
    pub menu: MenuOverlay,
    pub menu_selected: usize,
    pub header: HeaderState,
    pub animator: ScrollAnimator,
    observer: ViewportObserver,
    bindings: HashMap<RegionKey, Binding>,

    pub layout: PageLayout,
    terminal_width: u16,
    terminal_height: u16,

    /// Typewriters per hero section, with their start instants
    typewriters: HashMap<usize, Typewriter>,
    typing_started: HashMap<usize, Instant>,
    /// Card entrance animations, armed by their first visibility trigger
    reveals: HashMap<RegionKey, Reveal>,
    reveal_started: HashMap<RegionKey, Instant>,
    /// Counter runs: (re)started on every Enter trigger
    counter_started: HashMap<RegionKey, Instant>,
    /// Regions currently flagged in view by the generic observer
    in_view: HashSet<RegionKey>,

    pub images: ImageStore,
    pub hit: HitAreas,

    started: bool,
}

impl App {
    pub fn new(deck: Deck, deck_dir: PathBuf, config: AppConfig) -> Self {
        let theme = load_theme(&config.ui.theme);
        let slide_count = deck.slider_slides().map(|s| s.len()).unwrap_or(0);
        let slider = SliderController::new(slide_count, &config.slider);
        let drag = DragTracker::new(config.slider.swipe_threshold);
        let menu = MenuOverlay::new(Duration::from_millis(config.effects.menu_stagger_ms));
        let header = HeaderState::new(config.effects.header_condense_after_rows);
        let animator = ScrollAnimator::new(config.ui.motion.clone());
        let layout = PageLayout::compute(&deck, 80);
        let mut images = ImageStore::new(deck_dir);

        let mut observer = ViewportObserver::new();
        let mut bindings = HashMap::new();
        let mut typewriters = HashMap::new();
        let mut reveals = HashMap::new();

        let effects = &config.effects;
        for (idx, section) in deck.sections.iter().enumerate() {
            match &section.body {
                SectionBody::Hero {
                    headline,
                    typing,
                    typing_speed_ms,
                    ..
                } => {
                    if *typing {
                        let speed = typing_speed_ms.unwrap_or(effects.typing_speed_ms);
                        typewriters.insert(
                            idx,
                            Typewriter::new(headline.clone(), Duration::from_millis(speed)),
                        );
                        let key = RegionKey::section(idx);
                        observer.register(key, 0.0, 0, true);
                        bindings.insert(key, Binding::Typing);
                    }
                }
                SectionBody::Cards { cards } => {
                    for (item, card) in cards.iter().enumerate() {
                        let key = RegionKey::item(idx, item);
                        observer.register(
                            key,
                            effects.reveal_threshold,
                            effects.reveal_bottom_margin_rows,
                            true,
                        );
                        bindings.insert(key, Binding::CardReveal);
                        reveals.insert(
                            key,
                            Reveal::new(
                                card.reveal,
                                Duration::from_millis(card.delay_ms),
                                Duration::from_millis(effects.reveal_duration_ms),
                            ),
                        );
                    }
                }
                SectionBody::Stats { stats } => {
                    for (item, stat) in stats.iter().enumerate() {
                        let key = RegionKey::item(idx, item);
                        observer.register(key, effects.observe_threshold, 0, false);
                        bindings.insert(
                            key,
                            Binding::Stat {
                                observe: stat.observe,
                                target: stat.target,
                            },
                        );
                    }
                }
                SectionBody::Gallery { images: gallery } => {
                    for (item, image) in gallery.iter().enumerate() {
                        let key = RegionKey::item(idx, item);
                        observer.register(key, 0.0, 0, true);
                        bindings.insert(
                            key,
                            Binding::Image {
                                src: image.src.clone(),
                            },
                        );
                        images.register(&image.src);
                    }
                }
                SectionBody::Slider { .. } | SectionBody::Contact { .. } => {}
            }
        }

        Self {
            deck,
            config,
            theme,
            mode: Mode::Normal,
            pending_key: None,
            should_quit: false,
            status_message: None,
            slider,
            drag,
            menu,
            menu_selected: 0,
            header,
            animator,
            observer,
            bindings,
            layout,
            terminal_width: 80,
            terminal_height: 24,
            typewriters,
            typing_started: HashMap::new(),
            reveals,
            reveal_started: HashMap::new(),
            counter_started: HashMap::new(),
            in_view: HashSet::new(),
            images,
            hit: HitAreas::default(),
            started: false,
        }
    }

    /// Recompute geometry for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        if self.layout.width() != width {
            self.layout = PageLayout::compute(&self.deck, width);
        }
    }

    pub fn terminal_width(&self) -> u16 {
        self.terminal_width
    }

    /// Page rows visible at once (everything except the status bar)
    pub fn content_height(&self) -> u16 {
        self.terminal_height.saturating_sub(1)
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.content_height())
    }

    pub fn scroll(&self) -> u16 {
        self.animator.current_scroll()
    }

    /// Whether the event loop should run at the animation frame rate
    pub fn needs_fast_tick(&self, now: Instant) -> bool {
        if self.animator.needs_update() {
            return true;
        }
        if self
            .typing_started
            .iter()
            .any(|(idx, started)| match self.typewriters.get(idx) {
                Some(tw) => !tw.is_done(now.saturating_duration_since(*started)),
                None => false,
            })
        {
            return true;
        }
        if !self.reveal_started.is_empty() || !self.counter_started.is_empty() {
            return true;
        }
        false
    }

    /// Per-frame pipeline: scroll motion, header state, visibility scan,
    /// effect triggers, slider auto-advance
    pub fn on_frame(&mut self, now: Instant, img_tx: &mpsc::UnboundedSender<ImageLoadResult>) {
        if !self.started {
            self.started = true;
            self.slider.start(now);
        }

        let max_scroll = self.max_scroll();
        let scroll = self.animator.update(max_scroll, now);

        self.header.update(scroll);
        if self.menu.is_open() {
            self.header.reveal();
        }

        let viewport = Viewport {
            top: scroll,
            height: self.content_height(),
        };
        let layout = &self.layout;
        let triggers = self.observer.scan(viewport, |key| layout.span_of(key));
        for trigger in triggers {
            self.handle_trigger(trigger, now, img_tx);
        }

        // Retire finished one-shot animations so the fast tick can stop
        self.reveal_started.retain(|key, started| {
            match self.reveals.get(key) {
                Some(reveal) => {
                    !matches!(
                        reveal.phase_at(now.saturating_duration_since(*started)),
                        marquee_core::effects::RevealPhase::Settled
                    )
                }
                None => false,
            }
        });
        let counter_cfg = (
            self.config.effects.counter_duration_ms,
            self.config.effects.counter_step_ms,
        );
        let bindings = &self.bindings;
        self.counter_started.retain(|key, started| {
            match bindings.get(key) {
                Some(Binding::Stat { target, .. }) => {
                    let anim = CounterAnimation::new(
                        *target,
                        Duration::from_millis(counter_cfg.0),
                        Duration::from_millis(counter_cfg.1),
                    );
                    !anim.is_done(now.saturating_duration_since(*started))
                }
                _ => false,
            }
        });

        self.slider.poll(now);
    }

    fn handle_trigger(
        &mut self,
        trigger: Trigger,
        now: Instant,
        img_tx: &mpsc::UnboundedSender<ImageLoadResult>,
    ) {
        let Some(binding) = self.bindings.get(&trigger.key).cloned() else {
            return;
        };
        match (trigger.edge, &binding) {
            (Edge::Enter, Binding::Typing) => {
                self.typing_started.insert(trigger.key.section, now);
            }
            (Edge::Enter, Binding::CardReveal) => {
                self.reveal_started.entry(trigger.key).or_insert(now);
            }
            (Edge::Enter, Binding::Stat { observe, .. }) => {
                self.in_view.insert(trigger.key);
                if *observe == ObserveAction::Counter {
                    // One-shot per trigger: every entry starts a fresh run
                    self.counter_started.insert(trigger.key, now);
                }
            }
            (Edge::Leave, Binding::Stat { .. }) => {
                self.in_view.remove(&trigger.key);
            }
            (Edge::Enter, Binding::Image { src }) => {
                self.images.request(src, img_tx);
            }
            (Edge::Leave, _) => {}
        }
    }

    pub fn handle_image_result(&mut self, result: ImageLoadResult) {
        self.images.handle_result(result);
    }

    // --- effect state read by the widgets ---

    /// Visible slice of a hero headline, `None` when the headline is shown
    /// in full (no typing effect, or typing finished)
    pub fn typed_headline(&self, section: usize, now: Instant) -> Option<&str> {
        let tw = self.typewriters.get(&section)?;
        match self.typing_started.get(&section) {
            Some(started) => Some(tw.visible_at(now.saturating_duration_since(*started))),
            // Registered but never seen: nothing typed yet
            None => Some(""),
        }
    }

    /// Current entrance animation sample for a card
    pub fn reveal_phase(
        &self,
        key: RegionKey,
        now: Instant,
    ) -> Option<(marquee_core::effects::RevealPhase, (i16, i16))> {
        let reveal = self.reveals.get(&key)?;
        match self.reveal_started.get(&key) {
            Some(started) => {
                let elapsed = now.saturating_duration_since(*started);
                Some((reveal.phase_at(elapsed), reveal.offset_at(elapsed)))
            }
            // No start record means either "never triggered" or "finished
            // and retired"; the detached observer distinguishes the two
            None if self.observer_done(key) => {
                Some((marquee_core::effects::RevealPhase::Settled, (0, 0)))
            }
            None => Some((
                marquee_core::effects::RevealPhase::Pending,
                marquee_core::effects::reveal::initial_offset(reveal.kind()),
            )),
        }
    }

    fn observer_done(&self, key: RegionKey) -> bool {
        // One-shot registrations detach after firing
        !self.observer.is_observing(key)
    }

    /// Displayed value for a stat counter
    pub fn counter_value(&self, key: RegionKey, now: Instant) -> Option<u64> {
        let Binding::Stat { target, .. } = self.bindings.get(&key)? else {
            return None;
        };
        match self.counter_started.get(&key) {
            Some(started) => {
                let anim = CounterAnimation::new(
                    *target,
                    Duration::from_millis(self.config.effects.counter_duration_ms),
                    Duration::from_millis(self.config.effects.counter_step_ms),
                );
                Some(anim.value_at(now.saturating_duration_since(*started)))
            }
            None => {
                if self.observer_done(key) || self.in_view.contains(&key) {
                    Some(*target)
                } else {
                    Some(0)
                }
            }
        }
    }

    pub fn is_in_view(&self, key: RegionKey) -> bool {
        self.in_view.contains(&key)
    }

    /// Parallax is suppressed entirely on narrow terminals
    pub fn parallax_enabled(&self) -> bool {
        marquee_core::effects::parallax::enabled(
            self.terminal_width,
            self.config.effects.parallax_min_width,
        )
    }

    // --- navigation ---

    /// The section the top of the viewport currently rests in
    pub fn current_section(&self) -> Option<usize> {
        let scroll = self.scroll();
        let mut current = None;
        for (idx, section) in self.layout.sections.iter().enumerate() {
            if section.span.top <= scroll + HEADER_ROWS + 1 {
                current = Some(idx);
            }
        }
        current
    }

    /// Glide to a section anchor, landing just below the header
    pub fn anchor_to_section(&mut self, idx: usize, now: Instant) {
        let Some(top) = self.layout.section_top(idx) else {
            return;
        };
        let target = top.saturating_sub(HEADER_ROWS + 1);
        let max_scroll = self.max_scroll();
        self.animator.scroll_to_anchor(target, max_scroll, now);
    }

    pub fn anchor_to_nav(&mut self, nav_idx: usize, now: Instant) {
        let Some(link) = self.deck.nav.get(nav_idx) else {
            return;
        };
        if let Some(idx) = self.deck.section_index(&link.section) {
            self.anchor_to_section(idx, now);
        }
    }

    pub fn next_section(&mut self, now: Instant) {
        let next = self.current_section().map(|i| i + 1).unwrap_or(0);
        if next < self.deck.sections.len() {
            self.anchor_to_section(next, now);
        }
    }

    pub fn prev_section(&mut self, now: Instant) {
        if let Some(current) = self.current_section() {
            if current > 0 {
                self.anchor_to_section(current - 1, now);
            } else {
                self.anchor_to_section(0, now);
            }
        }
    }

    /// Which nav link to highlight, from section visibility
    pub fn active_nav_link(&self) -> Option<usize> {
        let viewport = Viewport {
            top: self.scroll(),
            height: self.content_height(),
        };
        let spans: Vec<_> = self
            .deck
            .nav
            .iter()
            .enumerate()
            .filter_map(|(nav_idx, link)| {
                let section_idx = self.deck.section_index(&link.section)?;
                let span = self.layout.sections.get(section_idx)?.span;
                Some((nav_idx, span))
            })
            .collect();
        marquee_core::effects::header::active_section(
            viewport,
            &spans,
            self.config.effects.section_link_threshold,
        )
    }

    // --- mouse ---

    /// Translate a mouse event into an action, updating drag/hover state
    pub fn on_mouse(&mut self, event: MouseEvent, now: Instant) -> Action {
        let (col, row) = (event.column, event.row);

        match event.kind {
            MouseEventKind::ScrollDown => {
                if !self.menu.scroll_locked() {
                    let max_scroll = self.max_scroll();
                    self.animator.scroll_by(3, max_scroll);
                }
                Action::None
            }
            MouseEventKind::ScrollUp => {
                if !self.menu.scroll_locked() {
                    let max_scroll = self.max_scroll();
                    self.animator.scroll_by(-3, max_scroll);
                }
                Action::None
            }
            MouseEventKind::Moved => {
                // Hover pause for the slider
                match self.hit.slider {
                    Some(rect) if contains(rect, col, row) => self.slider.hover_enter(),
                    _ => self.slider.hover_leave(now),
                }
                Action::None
            }
            MouseEventKind::Down(MouseButton::Left) => self.on_left_down(col, row),
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag.is_dragging() {
                    match self.drag.release(col) {
                        Some(DragOutcome::Next) => return Action::SliderNext,
                        Some(DragOutcome::Previous) => return Action::SliderPrev,
                        // Within the threshold: a tap, not a swipe
                        None => return Action::None,
                    }
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn on_left_down(&mut self, col: u16, row: u16) -> Action {
        if self.menu.is_open() {
            if let Some(panel) = self.hit.menu_panel {
                if contains(panel, col, row) {
                    for (rect, nav_idx) in &self.hit.menu_items {
                        if contains(*rect, col, row) {
                            return Action::NavGoto(*nav_idx);
                        }
                    }
                    return Action::None;
                }
            }
            // Click outside the menu content closes it
            return Action::CloseMenu;
        }

        if let Some(rect) = self.hit.menu_button {
            if contains(rect, col, row) {
                return Action::ToggleMenu;
            }
        }
        for (rect, nav_idx) in &self.hit.header_links {
            if contains(*rect, col, row) {
                return Action::NavGoto(*nav_idx);
            }
        }
        for (rect, slide_idx) in &self.hit.dots {
            if contains(*rect, col, row) {
                // Dots are a 1-based external surface, like number keys
                return Action::SliderGoto(slide_idx + 1);
            }
        }
        for (rect, url) in &self.hit.contact_links {
            if contains(*rect, col, row) {
                return Action::OpenUrl(url.clone());
            }
        }
        if self.config.slider.mouse_drag {
            if let Some(rect) = self.hit.slider {
                if contains(rect, col, row) {
                    self.drag.press(col);
                }
            }
        }
        Action::None
    }

    // --- misc ---

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    /// First contact link in the deck, for keyboard-driven opening
    pub fn first_contact_link(&self) -> Option<&str> {
        self.deck.sections.iter().find_map(|s| match &s.body {
            SectionBody::Contact { links, .. } => links.first().map(|l| l.url.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        toml::from_str(
            r#"
            [meta]
            title = "t"
            brand = "b"

            [[nav]]
            label = "Top"
            section = "hero"

            [[sections]]
            id = "hero"
            kind = "hero"
            headline = "Typed headline"
            typing = true

            [[sections]]
            id = "numbers"
            kind = "stats"

            [[sections.stats]]
            label = "Projects"
            target = 100

            [[sections]]
            id = "reviews"
            kind = "slider"

            [[sections.slides]]
            quote = "First"
            author = "A"

            [[sections.slides]]
            quote = "Second"
            author = "B"

            [[sections.slides]]
            quote = "Third"
            author = "C"
            "#,
        )
        .unwrap()
    }

    fn app() -> App {
        let mut app = App::new(deck(), PathBuf::from("."), AppConfig::default());
        app.resize(80, 24);
        app
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_slider_built_from_deck() {
        let app = app();
        assert_eq!(app.slider.len(), 3);
    }

    #[test]
    fn test_frame_starts_slider_and_types_visible_hero() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app();
        let t0 = Instant::now();

        app.on_frame(t0, &tx);
        assert_eq!(app.slider.active_index(), Some(0));

        // Hero is at the top, so typing starts on the first frame
        assert_eq!(app.typed_headline(0, t0), Some(""));
        let visible = app.typed_headline(0, t0 + ms(100)).unwrap();
        assert!("Typed headline".starts_with(visible));
        assert!(!visible.is_empty());
    }

    #[test]
    fn test_counter_starts_when_stats_scroll_into_view() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app();
        let t0 = Instant::now();
        app.on_frame(t0, &tx);

        let key = RegionKey::item(1, 0);
        // Stats sit near the top of this small deck, already in view
        assert!(app.is_in_view(key));
        let mid = app.counter_value(key, t0 + ms(1000)).unwrap();
        assert!(mid > 0 && mid < 100);
        assert_eq!(app.counter_value(key, t0 + ms(2000)), Some(100));
    }

    #[test]
    fn test_anchor_lands_below_header() {
        let mut app = app();
        let t0 = Instant::now();
        app.anchor_to_section(2, t0);
        let top = app.layout.section_top(2).unwrap();
        assert_eq!(
            app.animator.target_scroll(),
            top.saturating_sub(HEADER_ROWS + 1).min(app.max_scroll())
        );
    }

    #[test]
    fn test_mouse_outside_open_menu_closes_it() {
        let mut app = app();
        let t0 = Instant::now();
        app.menu.open(t0);
        app.hit.menu_panel = Some(Rect::new(20, 5, 40, 10));

        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(app.on_mouse(event, t0), Action::CloseMenu);
    }

    #[test]
    fn test_drag_across_slider_navigates() {
        let mut app = app();
        let t0 = Instant::now();
        app.hit.slider = Some(Rect::new(0, 10, 80, 8));

        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row: 12,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(app.on_mouse(down, t0), Action::None);

        // 9 cells with the default threshold of 8: a swipe left
        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 51,
            row: 12,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(app.on_mouse(up, t0), Action::SliderNext);
    }

    #[test]
    fn test_tap_on_slider_is_not_a_swipe() {
        let mut app = app();
        let t0 = Instant::now();
        app.hit.slider = Some(Rect::new(0, 10, 80, 8));

        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row: 12,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        app.on_mouse(down, t0);

        // Exactly the threshold distance: still a tap
        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 52,
            row: 12,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(app.on_mouse(up, t0), Action::None);
    }

    #[test]
    fn test_hover_pauses_auto_advance() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app();
        let t0 = Instant::now();
        app.on_frame(t0, &tx);
        app.hit.slider = Some(Rect::new(0, 10, 80, 8));

        let hover = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 40,
            row: 12,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        app.on_mouse(hover, t0);
        assert!(app.slider.is_hovered());

        app.on_frame(t0 + ms(10_000), &tx);
        assert_eq!(app.slider.active_index(), Some(0));
    }

    #[test]
    fn test_active_nav_link_highlights_visible_section() {
        let mut app = app();
        app.resize(80, 24);
        // Hero fills the top of the viewport
        assert_eq!(app.active_nav_link(), Some(0));
    }
}
