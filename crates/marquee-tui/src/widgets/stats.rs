use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use marquee_core::deck::{ObserveAction, Stat};
use marquee_core::effects::RegionKey;

use crate::app::App;
use crate::widgets::page::blank;

/// Stat row: values animate from 0 while in view (counter action), or
/// fade/slide in via the in-view flag for the other observed actions.
pub fn build(
    app: &App,
    section_idx: usize,
    stats: &[Stat],
    width: u16,
    now: Instant,
) -> Vec<Line<'static>> {
    if stats.is_empty() {
        return Vec::new();
    }

    let theme = &app.theme;
    let column = usize::from(width) / stats.len();

    let mut value_spans = Vec::with_capacity(stats.len());
    let mut label_spans = Vec::with_capacity(stats.len());

    for (item, stat) in stats.iter().enumerate() {
        let key = RegionKey::item(section_idx, item);
        let in_view = app.is_in_view(key);

        let value = match stat.observe {
            ObserveAction::Counter => app.counter_value(key, now).unwrap_or(stat.target),
            _ => stat.target,
        };

        // Non-counter actions stay muted until their region scrolls in
        let dimmed = stat.observe != ObserveAction::Counter && !in_view;
        let value_style = if dimmed {
            Style::default().fg(theme.muted)
        } else {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        };
        let label_style = Style::default().fg(theme.muted);

        value_spans.push(Span::styled(centered(&value.to_string(), column), value_style));
        label_spans.push(Span::styled(centered(&stat.label, column), label_style));
    }

    vec![
        Line::from(value_spans),
        Line::from(label_spans),
        blank(),
    ]
}

fn centered(text: &str, column: usize) -> String {
    let text_width = text.width();
    if text_width >= column {
        return text.to_string();
    }
    let left = (column - text_width) / 2;
    let right = column - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
