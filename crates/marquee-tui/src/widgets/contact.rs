use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use marquee_core::deck::ContactLink;

use crate::app::App;
use crate::layout::wrap_text;
use crate::widgets::page::blank;

/// Built contact block plus link rows for the mouse layer
pub struct ContactLines {
    pub lines: Vec<Line<'static>>,
    /// (row relative to the block top, url) for every link
    pub link_rows: Vec<(u16, String)>,
}

pub fn build(
    app: &App,
    intro: Option<&str>,
    links: &[ContactLink],
    width: u16,
) -> ContactLines {
    let theme = &app.theme;
    let mut lines = Vec::new();
    let mut link_rows = Vec::new();

    if let Some(intro) = intro {
        for row in wrap_text(intro, width.saturating_sub(4)) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(row, Style::default().fg(theme.fg0)),
            ]));
        }
        lines.push(blank());
    }

    for link in links {
        link_rows.push((lines.len() as u16, link.url.clone()));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("▸ ", Style::default().fg(theme.accent)),
            Span::styled(
                link.label.clone(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(
                format!("  {}", link.url),
                Style::default().fg(theme.muted),
            ),
        ]));
    }
    lines.push(blank());

    ContactLines { lines, link_rows }
}
