use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use marquee_core::deck::Slide;

use crate::app::App;
use crate::layout::wrap_text;
use crate::widgets::page::{blank, centered_line};

/// Built slider block plus the geometry the mouse layer needs
pub struct SliderLines {
    pub lines: Vec<Line<'static>>,
    /// Row of the indicator dots, relative to the block top
    pub dots_row: u16,
    /// (start column, slide index) for every dot
    pub dots: Vec<(u16, usize)>,
}

/// The showcase slider: one active slide, star rating, and indicator dots.
/// Every frame redraws all slides' dots from the single active index, so
/// there is always exactly one active pair.
pub fn build(app: &App, slides: &[Slide], width: u16) -> SliderLines {
    let theme = &app.theme;
    let quote_width = width.saturating_sub(8);
    let quote_rows = slides
        .iter()
        .map(|s| wrap_text(&s.quote, quote_width).len() as u16)
        .max()
        .unwrap_or(0);

    let mut lines = vec![blank()];
    let mut dots = Vec::new();

    let active = app.slider.active_index();
    let slide = active.and_then(|i| slides.get(i));

    match slide {
        Some(slide) => {
            let quote_style = Style::default()
                .fg(theme.fg1)
                .add_modifier(Modifier::ITALIC);
            let mut rows = wrap_text(&slide.quote, quote_width);
            if let Some(first) = rows.first_mut() {
                first.insert(0, '\u{201c}');
            }
            if let Some(last) = rows.last_mut() {
                last.push('\u{201d}');
            }
            let shown = rows.len() as u16;
            for row in rows {
                lines.push(centered_line(row, width, quote_style));
            }
            for _ in shown..quote_rows {
                lines.push(blank());
            }

            lines.push(blank());

            let mut author = format!("— {}", slide.author);
            if let Some(rating) = slide.rating {
                let rating = rating.min(5);
                let stars: String = "★".repeat(usize::from(rating))
                    + &"☆".repeat(usize::from(5 - rating));
                author = format!("{}  {}", author, stars);
            }
            lines.push(centered_line(author, width, Style::default().fg(theme.muted)));
        }
        None => {
            for _ in 0..quote_rows + 2 {
                lines.push(blank());
            }
        }
    }

    lines.push(blank());

    // Indicator dots, one per slide, 1:1 with the slide order
    let dots_row = lines.len() as u16;
    let dots_width = (slides.len() * 2).saturating_sub(1);
    let left = usize::from(width).saturating_sub(dots_width) / 2;
    let mut spans = vec![Span::raw(" ".repeat(left))];
    for (idx, _) in slides.iter().enumerate() {
        let is_active = active == Some(idx);
        let (glyph, style) = if is_active {
            ("●", Style::default().fg(theme.active))
        } else {
            ("○", Style::default().fg(theme.muted))
        };
        dots.push(((left + idx * 2) as u16, idx));
        spans.push(Span::styled(glyph, style));
        if idx + 1 < slides.len() {
            spans.push(Span::raw(" "));
        }
    }
    lines.push(Line::from(spans));
    lines.push(blank());
    lines.push(blank());

    SliderLines {
        lines,
        dots_row,
        dots,
    }
}
