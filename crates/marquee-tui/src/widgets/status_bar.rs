use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = if app.menu.is_open() {
            "MENU"
        } else {
            match app.mode {
                Mode::Normal => "NORMAL",
                Mode::Help => "HELP",
            }
        };

        // Scroll progress through the page
        let max_scroll = app.max_scroll();
        let percent = if max_scroll == 0 {
            100
        } else {
            u32::from(app.scroll()) * 100 / u32::from(max_scroll)
        };

        let slide_str = match app.slider.active_index() {
            Some(idx) => format!(" | Slide {}/{}", idx + 1, app.slider.len()),
            None => String::new(),
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(" {} | {}%{}", mode_str, percent, slide_str)
        };

        let help_hint = " j/k:scroll Tab:section h/l:slides m:menu ?:help q:quit ";
        let padding_len = usize::from(area.width)
            .saturating_sub(status_text.len())
            .saturating_sub(help_hint.len());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.muted).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
