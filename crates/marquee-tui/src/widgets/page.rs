use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use marquee_core::deck::SectionBody;
use marquee_core::effects::parallax;

use crate::app::App;
use crate::widgets::{cards, contact, gallery, hero, slider, stats};

/// The scrolling page: every section is built into one line per page row,
/// then the whole stack is drawn with the current scroll offset. Building
/// from scratch each frame keeps the draw idempotent, whatever the effect
/// states did since the last one.
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, now: Instant) {
        let scroll = app.scroll();
        let width = area.width;

        let mut page_lines: Vec<Line<'static>> = Vec::new();
        // Geometry collected while building, applied to hit areas after
        let mut slider_geo: Option<(usize, u16, Vec<(u16, usize)>)> = None;
        let mut slider_section: Option<usize> = None;
        let mut contact_geo: Vec<(u16, String)> = Vec::new();

        for (idx, section) in app.deck.sections.iter().enumerate() {
            let Some(layout) = app.layout.sections.get(idx) else {
                continue;
            };
            let span = layout.span;

            // Top-align with the layout even if an earlier builder drifted
            while (page_lines.len() as u16) < span.top {
                page_lines.push(blank());
            }
            page_lines.truncate(span.top as usize);

            let mut section_lines: Vec<Line<'static>> = Vec::new();
            let mut title_rows: u16 = 0;
            if let Some(title) = &section.title {
                title_rows = 2;
                section_lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        title.clone(),
                        Style::default()
                            .fg(app.theme.fg1)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    ),
                ]));
                section_lines.push(blank());
            }

            match &section.body {
                SectionBody::Hero {
                    headline,
                    subtitle,
                    decorations,
                    ..
                } => {
                    section_lines.extend(hero::build(
                        app,
                        idx,
                        headline,
                        subtitle.as_deref(),
                        decorations,
                        width,
                        now,
                    ));
                }
                SectionBody::Cards { cards: items } => {
                    section_lines.extend(cards::build(app, idx, items, width, now));
                }
                SectionBody::Stats { stats: items } => {
                    section_lines.extend(stats::build(app, idx, items, width, now));
                }
                SectionBody::Slider { slides } => {
                    let built = slider::build(app, slides, width);
                    slider_section = Some(idx);
                    slider_geo = Some((idx, title_rows + built.dots_row, built.dots));
                    section_lines.extend(built.lines);
                }
                SectionBody::Gallery { images } => {
                    section_lines.extend(gallery::build(app, images, width));
                }
                SectionBody::Contact { intro, links } => {
                    let built = contact::build(app, intro.as_deref(), links, width);
                    for (rel_row, url) in built.link_rows {
                        contact_geo.push((span.top + title_rows + rel_row, url));
                    }
                    section_lines.extend(built.lines);
                }
            }

            // Pin the section to its computed height
            section_lines.truncate(span.height as usize);
            while (section_lines.len() as u16) < span.height {
                section_lines.push(blank());
            }
            page_lines.extend(section_lines);
            page_lines.push(blank());
        }

        let background = Block::default().style(Style::default().bg(app.theme.bg0));
        frame.render_widget(background, area);

        let paragraph = Paragraph::new(Text::from(page_lines))
            .style(Style::default().fg(app.theme.fg0).bg(app.theme.bg0))
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);

        Self::render_parallax(frame, area, app, scroll);

        // Record clickable geometry for the mouse layer
        app.hit.slider = slider_section.and_then(|idx| {
            let span = app.layout.sections.get(idx)?.span;
            page_rows_to_rect(area, scroll, span.top, span.height)
        });
        app.hit.dots.clear();
        if let Some((section_idx, dots_rel_row, dots)) = slider_geo {
            if let Some(span) = app.layout.sections.get(section_idx).map(|s| s.span) {
                let page_row = span.top + dots_rel_row;
                if let Some(rect) = page_rows_to_rect(area, scroll, page_row, 1) {
                    for (col, slide_idx) in dots {
                        let x = area.x.saturating_add(col);
                        if x < area.x + area.width {
                            app.hit.dots.push((Rect::new(x, rect.y, 1, 1), slide_idx));
                        }
                    }
                }
            }
        }
        app.hit.contact_links = contact_geo
            .into_iter()
            .filter_map(|(page_row, url)| {
                let rect = page_rows_to_rect(area, scroll, page_row, 1)?;
                Some((rect, url))
            })
            .collect();
    }

    /// Floating hero decorations, displaced against the scroll direction.
    /// Skipped entirely on narrow terminals.
    fn render_parallax(frame: &mut Frame, area: Rect, app: &App, scroll: u16) {
        if !app.parallax_enabled() {
            return;
        }
        for (idx, section) in app.deck.sections.iter().enumerate() {
            let SectionBody::Hero { decorations, .. } = &section.body else {
                continue;
            };
            let Some(span) = app.layout.sections.get(idx).map(|s| s.span) else {
                continue;
            };
            for deco in decorations {
                let base = i32::from(span.top) + i32::from(deco.row);
                let page_row = base + parallax::offset(scroll, deco.speed);
                let screen_row = page_row - i32::from(scroll);
                if screen_row < 0 || screen_row >= i32::from(area.height) {
                    continue;
                }
                let glyph_width = deco.glyph.width() as u16;
                if glyph_width == 0 || deco.col + glyph_width > area.width {
                    continue;
                }
                let rect = Rect::new(
                    area.x + deco.col,
                    area.y + screen_row as u16,
                    glyph_width,
                    1,
                );
                let glyph = Paragraph::new(Span::styled(
                    deco.glyph.clone(),
                    Style::default().fg(app.theme.accent),
                ));
                frame.render_widget(glyph, rect);
            }
        }
    }
}

/// A slice of page rows as a screen rect, `None` when fully scrolled out
fn page_rows_to_rect(area: Rect, scroll: u16, top: u16, height: u16) -> Option<Rect> {
    let view_bottom = scroll + area.height;
    let bottom = top + height;
    if bottom <= scroll || top >= view_bottom {
        return None;
    }
    let visible_top = top.max(scroll);
    let visible_bottom = bottom.min(view_bottom);
    Some(Rect::new(
        area.x,
        area.y + (visible_top - scroll),
        area.width,
        visible_bottom - visible_top,
    ))
}

/// An empty page row
pub fn blank() -> Line<'static> {
    Line::from("")
}

/// A centered line of styled text
pub fn centered_line(text: String, width: u16, style: Style) -> Line<'static> {
    let text_width = text.width();
    let pad = usize::from(width).saturating_sub(text_width) / 2;
    Line::from(vec![Span::raw(" ".repeat(pad)), Span::styled(text, style)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rows_to_rect() {
        let area = Rect::new(0, 2, 80, 20);
        // Fully visible
        assert_eq!(
            page_rows_to_rect(area, 0, 5, 3),
            Some(Rect::new(0, 7, 80, 3))
        );
        // Partially scrolled off the top
        assert_eq!(
            page_rows_to_rect(area, 6, 5, 3),
            Some(Rect::new(0, 2, 80, 2))
        );
        // Fully above the viewport
        assert_eq!(page_rows_to_rect(area, 10, 5, 3), None);
        // Below the viewport
        assert_eq!(page_rows_to_rect(area, 0, 30, 3), None);
    }

    #[test]
    fn test_centered_line_padding() {
        let line = centered_line("abcd".to_string(), 10, Style::default());
        assert_eq!(line.spans[0].content.as_ref(), "   ");
    }
}
