use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub struct HelpWidget;

impl HelpWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let area = frame.area();
        let theme = &app.theme;
        let keymap = &app.config.keymap;

        let entries = [
            (keymap.scroll_down.as_str(), "scroll down"),
            (keymap.scroll_up.as_str(), "scroll up"),
            (keymap.scroll_half_down.as_str(), "half page down"),
            (keymap.scroll_half_up.as_str(), "half page up"),
            (keymap.jump_to_top.as_str(), "jump to top"),
            (keymap.jump_to_bottom.as_str(), "jump to bottom"),
            (keymap.next_section.as_str(), "next section"),
            (keymap.prev_section.as_str(), "previous section"),
            (keymap.slider_next.as_str(), "next slide"),
            (keymap.slider_prev.as_str(), "previous slide"),
            ("1-9", "jump to slide"),
            (keymap.toggle_menu.as_str(), "open menu"),
            (keymap.open_link.as_str(), "open contact link"),
            (keymap.quit.as_str(), "quit"),
        ];

        let width = 44u16.min(area.width.saturating_sub(4));
        let height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let panel = centered_rect(width, height, area);

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let mut lines = vec![Line::from("")];
        for (key, description) in entries {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{:<9}", key),
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(description, Style::default().fg(theme.fg0)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
