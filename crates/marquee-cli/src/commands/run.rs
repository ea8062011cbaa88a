use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use marquee_core::{AppConfig, Deck};
use marquee_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, ImageLoadResult},
    input::{handle_key_event, Action},
    keymap::Keymap,
    widgets::{HeaderWidget, HelpWidget, MenuWidget, PageWidget, StatusBarWidget},
};

pub async fn run(config: AppConfig, deck_path: &Path) -> Result<()> {
    let deck = Deck::load(deck_path)
        .with_context(|| format!("failed to load deck {:?} (try `marquee init`)", deck_path))?;
    deck.validate()?;
    tracing::debug!("Playing {:?}", deck_path);

    let keymap = Keymap::from_config(&config.keymap);
    let deck_dir = deck_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(deck.meta.title.as_str())
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.motion.animation_fps);

    let mut app = App::new(deck, deck_dir, config);
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    // Channel for async image decode results
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    // Checked at the END of each iteration to pick the NEXT iteration's
    // tick rate, so motion gets frame-rate polling immediately
    let mut needs_fast_update = false;

    let result = (|| -> Result<()> {
        loop {
            let now = Instant::now();

            // Drain completed image decodes (non-blocking)
            while let Ok(result) = img_rx.try_recv() {
                app.handle_image_result(result);
            }

            // Scroll motion, header state, visibility triggers, slider tick
            app.on_frame(now, &img_tx);

            terminal.draw(|frame| {
                let size = frame.area();

                let main_layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(size);

                app.hit.clear();
                PageWidget::render(frame, main_layout[0], &mut app, now);
                HeaderWidget::render(frame, main_layout[0], &mut app);
                StatusBarWidget::render(frame, main_layout[1], &app);
                MenuWidget::render(frame, &mut app, now);
                if app.mode == Mode::Help {
                    HelpWidget::render(frame, &app);
                }
            })?;

            let event = if needs_fast_update {
                event_handler.next_animation()?
            } else {
                event_handler.next()?
            };
            if let Some(event) = event {
                match event {
                    AppEvent::Key(key) => {
                        let action = handle_key_event(key, &app, &keymap);
                        handle_action(&mut app, action, Instant::now());
                    }
                    AppEvent::Mouse(mouse) => {
                        let action = app.on_mouse(mouse, Instant::now());
                        handle_action(&mut app, action, Instant::now());
                    }
                    AppEvent::Resize(w, h) => {
                        app.resize(w, h);
                    }
                    AppEvent::Tick => {}
                }
            }

            needs_fast_update = app.needs_fast_tick(Instant::now());

            if app.should_quit {
                break;
            }
        }
        Ok(())
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn handle_action(app: &mut App, action: Action, now: Instant) {
    // A pending 'g' only survives into the very next key
    if action != Action::PendingG {
        app.clear_pending_key();
    }
    if !matches!(action, Action::None) {
        app.clear_status();
    }

    let max_scroll = app.max_scroll();
    let viewport = app.content_height();

    match action {
        Action::Quit => {
            app.should_quit = true;
        }

        Action::ScrollDown => app.animator.scroll_down(max_scroll),
        Action::ScrollUp => app.animator.scroll_up(max_scroll),
        Action::ScrollHalfPageDown => app.animator.scroll_half_page_down(viewport, max_scroll),
        Action::ScrollHalfPageUp => app.animator.scroll_half_page_up(viewport, max_scroll),
        Action::ScrollPageDown => app.animator.scroll_full_page_down(viewport, max_scroll),
        Action::ScrollPageUp => app.animator.scroll_full_page_up(viewport, max_scroll),
        Action::JumpToTop => app.animator.set_scroll(0),
        Action::JumpToBottom => app.animator.set_scroll(max_scroll),
        Action::PendingG => {
            app.pending_key = Some('g');
        }

        Action::NextSection => app.next_section(now),
        Action::PrevSection => app.prev_section(now),
        Action::NavGoto(idx) => {
            app.menu.close();
            app.anchor_to_nav(idx, now);
        }

        Action::SliderNext => app.slider.next(now),
        Action::SliderPrev => app.slider.previous(now),
        Action::SliderGoto(n) => app.slider.go_to_slide(n, now),

        Action::ToggleMenu => {
            app.menu_selected = 0;
            app.menu.toggle(now);
        }
        Action::CloseMenu => app.menu.close(),
        Action::MenuDown => {
            let count = app.deck.nav.len();
            if count > 0 && app.menu_selected + 1 < count {
                app.menu_selected += 1;
            }
        }
        Action::MenuUp => {
            app.menu_selected = app.menu_selected.saturating_sub(1);
        }
        Action::MenuSelect => {
            let selected = app.menu_selected;
            app.menu.close();
            app.anchor_to_nav(selected, now);
        }

        Action::OpenLink => match app.first_contact_link().map(str::to_owned) {
            Some(url) => open_url(app, &url),
            None => app.set_status("No contact links in this deck"),
        },
        Action::OpenUrl(url) => open_url(app, &url),

        Action::Help => {
            app.mode = Mode::Help;
        }
        Action::ExitMode => {
            app.mode = Mode::Normal;
            app.menu.close();
        }
        Action::None => {}
    }
}

fn open_url(app: &mut App, url: &str) {
    match open::that(url) {
        Ok(()) => app.set_status(format!("Opened {}", url)),
        Err(e) => app.set_status(format!("Failed to open {}: {}", url, e)),
    }
}
