use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, HEADER_ROWS};

/// Fixed header bar overlaying the top of the page: brand, nav links with
/// the active-section highlight, and the menu button. Hidden entirely
/// while scrolling down; condensed once past the scroll threshold.
pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        if app.header.is_hidden() || area.height < HEADER_ROWS {
            return;
        }

        let theme = &app.theme;
        let bar = Rect::new(area.x, area.y, area.width, HEADER_ROWS);

        let bg = if app.header.is_condensed() {
            theme.bg2
        } else {
            theme.bg1
        };

        let active = app.active_nav_link();

        // Brand on the left
        let mut spans = vec![
            Span::styled(
                format!(" {} ", app.deck.meta.brand),
                Style::default()
                    .fg(theme.accent)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        let mut used = app.deck.meta.brand.width() + 2;

        // Nav links, tracked for mouse hits
        let mut links = Vec::new();
        for (idx, link) in app.deck.nav.iter().enumerate() {
            let label = format!("  {}  ", link.label);
            let style = if active == Some(idx) {
                Style::default()
                    .fg(theme.active)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.fg0).bg(bg)
            };
            let label_width = label.width() as u16;
            links.push((
                Rect::new(area.x + used as u16, bar.y, label_width, 1),
                idx,
            ));
            used += label.width();
            spans.push(Span::styled(label, style));
        }

        // Menu button on the far right
        let button_label = " ≡ ";
        let button_x = area.x + area.width.saturating_sub(button_label.width() as u16);
        let fill = usize::from(area.width)
            .saturating_sub(used)
            .saturating_sub(button_label.width());
        spans.push(Span::styled(" ".repeat(fill), Style::default().bg(bg)));
        spans.push(Span::styled(
            button_label,
            Style::default()
                .fg(theme.fg1)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));

        let rule_style = Style::default().fg(theme.bg2).bg(theme.bg0);
        let rule = "─".repeat(usize::from(area.width));
        let lines = vec![Line::from(spans), Line::from(Span::styled(rule, rule_style))];
        frame.render_widget(Paragraph::new(lines), bar);

        app.hit.header_links = links;
        app.hit.menu_button = Some(Rect::new(
            button_x,
            bar.y,
            button_label.width() as u16,
            1,
        ));
    }
}
