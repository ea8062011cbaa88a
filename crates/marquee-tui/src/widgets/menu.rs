use std::time::Instant;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;

/// Nav menu overlay: a centered panel over the dimmed page. Items stagger
/// in one by one after the menu opens.
pub struct MenuWidget;

impl MenuWidget {
    pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
        if !app.menu.is_open() {
            app.hit.menu_panel = None;
            app.hit.menu_items.clear();
            return;
        }

        let area = frame.area();
        let theme = &app.theme;

        let longest = app
            .deck
            .nav
            .iter()
            .map(|l| l.label.len())
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 10).max(24).min(area.width.saturating_sub(4));
        let height = (app.deck.nav.len() as u16 + 4).min(area.height.saturating_sub(2));
        let panel = centered_rect(width, height, area);

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(" Menu ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let mut items = Vec::new();
        let mut lines = vec![Line::from("")];
        for (idx, link) in app.deck.nav.iter().enumerate() {
            if !app.menu.item_visible(idx, now) {
                lines.push(Line::from(""));
                continue;
            }
            let selected = idx == app.menu_selected;
            let style = if selected {
                Style::default()
                    .fg(theme.fg1)
                    .bg(theme.bg2)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg0)
            };
            let marker = if selected { "▸ " } else { "  " };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}{}", marker, link.label), style),
            ]));
            let row = inner.y + 1 + idx as u16;
            if row < inner.y + inner.height {
                items.push((Rect::new(inner.x, row, inner.width, 1), idx));
            }
        }
        frame.render_widget(Paragraph::new(lines), inner);

        app.hit.menu_panel = Some(panel);
        app.hit.menu_items = items;
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
