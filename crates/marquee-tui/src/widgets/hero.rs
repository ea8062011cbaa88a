use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use std::time::Instant;

use marquee_core::deck::Decoration;

use crate::app::App;
use crate::layout::wrap_text;
use crate::widgets::page::{blank, centered_line};

/// Hero section: headline (optionally typed in), subtitle, and floating
/// decorations that the parallax overlay positions separately.
pub fn build(
    app: &App,
    section_idx: usize,
    headline: &str,
    subtitle: Option<&str>,
    _decorations: &[Decoration],
    width: u16,
    now: Instant,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = vec![blank()];

    let shown: &str = app.typed_headline(section_idx, now).unwrap_or(headline);
    let headline_style = Style::default()
        .fg(theme.fg1)
        .add_modifier(Modifier::BOLD);
    for row in wrap_text(shown, width.saturating_sub(4)) {
        lines.push(centered_line(row, width, headline_style));
    }
    // Keep the block height stable while the headline types in
    let full_rows = wrap_text(headline, width.saturating_sub(4)).len();
    let shown_rows = wrap_text(shown, width.saturating_sub(4)).len();
    for _ in shown_rows..full_rows {
        lines.push(blank());
    }

    if let Some(subtitle) = subtitle {
        lines.push(blank());
        for row in wrap_text(subtitle, width.saturating_sub(4)) {
            lines.push(centered_line(row, width, Style::default().fg(theme.muted)));
        }
    }
    lines.push(blank());

    lines
}
