use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::Instant;

use marquee_core::deck::Card;
use marquee_core::effects::{RegionKey, RevealPhase};

use crate::app::App;
use crate::layout::wrap_text;
use crate::widgets::page::blank;

/// Left padding of card content
const CARD_INDENT: u16 = 2;

/// Card list with entrance animations: each card renders blank until its
/// reveal triggers, then slides/fades toward its resting position.
pub fn build(
    app: &App,
    section_idx: usize,
    cards: &[Card],
    width: u16,
    now: Instant,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let content_width = width.saturating_sub(CARD_INDENT * 2);
    let mut lines = Vec::new();

    for (item, card) in cards.iter().enumerate() {
        let key = RegionKey::item(section_idx, item);
        let block_height = 1 + wrap_text(&card.body, content_width).len();

        let (phase, (col_offset, row_offset)) = app
            .reveal_phase(key, now)
            .unwrap_or((RevealPhase::Settled, (0, 0)));

        if phase == RevealPhase::Pending {
            for _ in 0..block_height {
                lines.push(blank());
            }
            lines.push(blank());
            continue;
        }

        let dim = matches!(phase, RevealPhase::Entering { .. });
        let title_style = if dim {
            Style::default().fg(theme.muted)
        } else {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        };
        let body_style = if dim {
            Style::default().fg(theme.muted)
        } else {
            Style::default().fg(theme.fg0)
        };

        let indent = (i32::from(CARD_INDENT) + i32::from(col_offset)).max(0) as usize;
        let pad = " ".repeat(indent);

        let mut block: Vec<Line<'static>> = Vec::with_capacity(block_height);
        block.push(Line::from(vec![
            Span::raw(pad.clone()),
            Span::styled(card.title.clone(), title_style),
        ]));
        for row in wrap_text(&card.body, content_width) {
            block.push(Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(row, body_style),
            ]));
        }

        // Vertical offset shifts the block inside its own rows
        if row_offset > 0 {
            for _ in 0..row_offset {
                block.insert(0, blank());
            }
            block.truncate(block_height);
        } else if row_offset < 0 {
            let skip = row_offset.unsigned_abs() as usize;
            block.drain(..skip.min(block.len()));
            while block.len() < block_height {
                block.push(blank());
            }
        }

        lines.extend(block);
        lines.push(blank());
    }

    lines
}
