//! Page geometry.
//!
//! Lays the deck out as a vertical stack of sections at a given terminal
//! width and records every section's (and item's) span in page rows. The
//! visibility observer, anchor navigation, and the renderer all read the
//! same geometry, so what triggers is exactly what is on screen.
//! Recomputed on resize.

use marquee_core::deck::{Deck, SectionBody};
use marquee_core::effects::{RegionKey, RegionSpan};
use unicode_width::UnicodeWidthStr;

/// Rows a gallery image occupies (half-block rendering)
pub const IMAGE_ROWS: u16 = 10;
/// Blank rows between sections
const SECTION_GAP: u16 = 1;
/// Columns of horizontal padding inside a section
pub const SECTION_PADDING: u16 = 2;

#[derive(Debug, Clone)]
pub struct SectionLayout {
    pub span: RegionSpan,
    /// Spans of observable items inside the section, in page rows
    pub items: Vec<RegionSpan>,
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    pub sections: Vec<SectionLayout>,
    pub total_height: u16,
    width: u16,
}

impl PageLayout {
    pub fn compute(deck: &Deck, width: u16) -> Self {
        let content_width = content_width(width);
        let mut sections = Vec::with_capacity(deck.sections.len());
        let mut top: u16 = 0;

        for section in &deck.sections {
            let title_rows = if section.title.is_some() { 2 } else { 0 };
            let mut items = Vec::new();
            let mut body_rows: u16 = 0;
            let body_top = top + title_rows;

            match &section.body {
                SectionBody::Hero {
                    headline,
                    subtitle,
                    decorations,
                    ..
                } => {
                    body_rows += 1;
                    body_rows += wrap_height(headline, content_width);
                    if let Some(subtitle) = subtitle {
                        body_rows += 1 + wrap_height(subtitle, content_width);
                    }
                    body_rows += 1;
                    // Decorations overlay the hero, never extend the page;
                    // make sure their anchor rows exist
                    let deco_rows = decorations
                        .iter()
                        .map(|d| d.row + 1)
                        .max()
                        .unwrap_or(0);
                    body_rows = body_rows.max(deco_rows);
                }
                SectionBody::Cards { cards } => {
                    for card in cards {
                        let card_rows = 1 + wrap_height(&card.body, content_width) + 1;
                        items.push(RegionSpan {
                            top: body_top + body_rows,
                            height: card_rows.saturating_sub(1),
                        });
                        body_rows += card_rows;
                    }
                }
                SectionBody::Stats { stats } => {
                    // One shared row block; each stat observes the block
                    let block = RegionSpan {
                        top: body_top,
                        height: 3,
                    };
                    items.extend(stats.iter().map(|_| block));
                    body_rows += 3;
                }
                SectionBody::Slider { slides } => {
                    let quote_rows = slides
                        .iter()
                        .map(|s| wrap_height(&s.quote, content_width.saturating_sub(4)))
                        .max()
                        .unwrap_or(0);
                    // borders + padding + quote + author + dots
                    body_rows += quote_rows + 7;
                }
                SectionBody::Gallery { images } => {
                    for image in images {
                        let caption_rows = u16::from(image.caption.is_some());
                        items.push(RegionSpan {
                            top: body_top + body_rows,
                            height: IMAGE_ROWS + caption_rows,
                        });
                        body_rows += IMAGE_ROWS + caption_rows + 1;
                    }
                }
                SectionBody::Contact { intro, links } => {
                    if let Some(intro) = intro {
                        body_rows += wrap_height(intro, content_width) + 1;
                    }
                    body_rows += links.len() as u16 + 1;
                }
            }

            let height = title_rows + body_rows;
            sections.push(SectionLayout {
                span: RegionSpan { top, height },
                items,
            });
            top = top.saturating_add(height + SECTION_GAP);
        }

        Self {
            sections,
            total_height: top,
            width,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn section_top(&self, idx: usize) -> Option<u16> {
        self.sections.get(idx).map(|s| s.span.top)
    }

    /// Highest legal scroll offset for a viewport of the given height
    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.total_height.saturating_sub(viewport_height)
    }

    /// Geometry lookup for the visibility observer
    pub fn span_of(&self, key: RegionKey) -> Option<RegionSpan> {
        let section = self.sections.get(key.section)?;
        match key.item_index() {
            None => Some(section.span),
            Some(item) => section.items.get(item).copied(),
        }
    }
}

/// Usable content width inside a section
pub fn content_width(width: u16) -> u16 {
    width.saturating_sub(SECTION_PADDING * 2).max(10)
}

/// Greedy word-wrap of `text` into rows of at most `width` columns.
/// The renderer and the height calculation share this, so the geometry the
/// observer sees always matches what is drawn.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let width = usize::from(width);
    let mut rows = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            rows.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut used = 0usize;
        for word in line.split_whitespace() {
            let word_width = word.width();
            if used == 0 {
                current = word.to_string();
                used = word_width;
            } else if used + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                used += 1 + word_width;
            } else {
                rows.push(std::mem::take(&mut current));
                current = word.to_string();
                used = word_width;
            }
        }
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// Rows needed to word-wrap `text` at `width` columns
pub fn wrap_height(text: &str, width: u16) -> u16 {
    wrap_text(text, width).len() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::Deck;

    fn deck() -> Deck {
        toml::from_str(
            r#"
            [meta]
            title = "t"
            brand = "b"

            [[sections]]
            id = "hero"
            kind = "hero"
            headline = "Hello"

            [[sections]]
            id = "work"
            kind = "cards"
            title = "Work"

            [[sections.cards]]
            title = "One"
            body = "short"

            [[sections.cards]]
            title = "Two"
            body = "short"

            [[sections]]
            id = "numbers"
            kind = "stats"

            [[sections.stats]]
            label = "Projects"
            target = 10
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_wrap_height() {
        assert_eq!(wrap_height("hello", 20), 1);
        assert_eq!(wrap_height("hello world", 5), 2);
        assert_eq!(wrap_height("a\nb", 20), 2);
        assert_eq!(wrap_height("", 20), 1);
    }

    #[test]
    fn test_sections_stack_without_overlap() {
        let layout = PageLayout::compute(&deck(), 80);
        assert_eq!(layout.sections.len(), 3);

        let mut prev_bottom = 0;
        for section in &layout.sections {
            assert!(section.span.top >= prev_bottom);
            assert!(section.span.height > 0);
            prev_bottom = section.span.top + section.span.height;
        }
        assert!(layout.total_height >= prev_bottom);
    }

    #[test]
    fn test_items_fall_inside_their_section() {
        let layout = PageLayout::compute(&deck(), 80);
        let cards = &layout.sections[1];
        assert_eq!(cards.items.len(), 2);
        for item in &cards.items {
            assert!(item.top >= cards.span.top);
            assert!(item.top + item.height <= cards.span.top + cards.span.height);
        }
    }

    #[test]
    fn test_span_lookup() {
        let layout = PageLayout::compute(&deck(), 80);
        assert!(layout.span_of(RegionKey::section(0)).is_some());
        assert!(layout.span_of(RegionKey::item(1, 1)).is_some());
        assert!(layout.span_of(RegionKey::item(1, 2)).is_none());
        assert!(layout.span_of(RegionKey::section(9)).is_none());
    }

    #[test]
    fn test_max_scroll() {
        let layout = PageLayout::compute(&deck(), 80);
        assert_eq!(layout.max_scroll(layout.total_height + 10), 0);
        assert_eq!(
            layout.max_scroll(10),
            layout.total_height.saturating_sub(10)
        );
    }

    #[test]
    fn test_section_top() {
        let layout = PageLayout::compute(&deck(), 80);
        assert_eq!(layout.section_top(0), Some(0));
        assert!(layout.section_top(1).unwrap() > 0);
        assert_eq!(layout.section_top(7), None);
    }
}
