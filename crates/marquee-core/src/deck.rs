use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A page deck: everything marquee renders comes from this file.
///
/// Field names are the integration surface between deck files and the
/// player, the way class names and data-attributes bind markup to behavior
/// on a web page. Renaming a field breaks existing decks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub meta: Meta,
    /// Header nav links, in display order
    #[serde(default)]
    pub nav: Vec<NavLink>,
    /// Page sections, in scroll order
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Terminal title
    pub title: String,
    /// Brand text shown in the header
    pub brand: String,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// A header link targeting a section anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Target section id
    pub section: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Anchor id, unique across the deck
    pub id: String,
    /// Optional heading rendered above the section body
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Hero {
        headline: String,
        /// Reveal the headline one character at a time when first visible
        #[serde(default)]
        typing: bool,
        /// Milliseconds per character (player default when absent)
        #[serde(default)]
        typing_speed_ms: Option<u64>,
        #[serde(default)]
        subtitle: Option<String>,
        /// Floating glyphs moved against the scroll direction
        #[serde(default)]
        decorations: Vec<Decoration>,
    },
    Cards {
        cards: Vec<Card>,
    },
    Stats {
        stats: Vec<Stat>,
    },
    Slider {
        slides: Vec<Slide>,
    },
    Gallery {
        images: Vec<GalleryImage>,
    },
    Contact {
        #[serde(default)]
        intro: Option<String>,
        links: Vec<ContactLink>,
    },
}

/// A floating parallax glyph anchored inside its section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub glyph: String,
    pub col: u16,
    pub row: u16,
    /// Parallax speed factor
    #[serde(default = "default_speed")]
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: String,
    /// Entrance animation
    #[serde(default)]
    pub reveal: RevealKind,
    /// Extra delay before this card's reveal starts
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    /// Final displayed value
    pub target: u64,
    /// What the visibility observer does with this stat
    #[serde(default)]
    pub observe: ObserveAction,
}

/// One unit of rotating content in the showcase slider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub quote: String,
    pub author: String,
    /// Star rating out of 5
    #[serde(default)]
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image path, resolved relative to the deck file; decoded lazily when
    /// the gallery scrolls into view
    pub src: PathBuf,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

/// Entrance animation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RevealKind {
    #[default]
    FadeInUp,
    FadeInDown,
    SlideInLeft,
    SlideInRight,
    ScaleIn,
}

/// Dispatch tag for the generic visibility observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ObserveAction {
    #[default]
    Counter,
    FadeIn,
    SlideUp,
}

fn default_speed() -> f64 {
    0.5
}

impl Deck {
    /// Load a deck from a TOML (or, by extension, JSON) file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let deck: Deck = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content).map_err(|e| crate::Error::Deck(e.to_string()))?
        };
        tracing::debug!(
            "Loaded deck {:?}: {} sections, {} nav links",
            path,
            deck.sections.len(),
            deck.nav.len()
        );
        Ok(deck)
    }

    /// Collect structural problems without failing on the first one
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut seen = std::collections::HashSet::new();
        for section in &self.sections {
            if section.id.is_empty() {
                problems.push("section with empty id".to_string());
            }
            if !seen.insert(section.id.as_str()) {
                problems.push(format!("duplicate section id '{}'", section.id));
            }
        }

        for link in &self.nav {
            if !self.sections.iter().any(|s| s.id == link.section) {
                problems.push(format!(
                    "nav link '{}' targets unknown section '{}'",
                    link.label, link.section
                ));
            }
        }

        for section in &self.sections {
            if let SectionBody::Slider { slides } = &section.body {
                for slide in slides {
                    if let Some(rating) = slide.rating {
                        if rating > 5 {
                            problems.push(format!(
                                "slide by '{}' has rating {} (max 5)",
                                slide.author, rating
                            ));
                        }
                    }
                }
            }
        }

        problems
    }

    /// Validate, failing with the first problem found
    pub fn validate(&self) -> crate::Result<()> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(crate::Error::Deck(problem)),
            None => Ok(()),
        }
    }

    /// Find a section's position by anchor id
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// The slides of the first slider section, if any
    pub fn slider_slides(&self) -> Option<&[Slide]> {
        self.sections.iter().find_map(|s| match &s.body {
            SectionBody::Slider { slides } => Some(slides.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [meta]
        title = "Acme Studio"
        brand = "ACME"

        [[nav]]
        label = "Home"
        section = "hero"

        [[nav]]
        label = "Reviews"
        section = "reviews"

        [[sections]]
        id = "hero"
        kind = "hero"
        headline = "We build fast software"
        typing = true
        subtitle = "Tools that stay out of your way"

        [[sections.decorations]]
        glyph = "*"
        col = 10
        row = 2
        speed = 0.3

        [[sections]]
        id = "work"
        kind = "cards"
        title = "What we do"

        [[sections.cards]]
        title = "Systems"
        body = "Low-level plumbing"
        reveal = "slide-in-left"
        delay_ms = 100

        [[sections]]
        id = "numbers"
        kind = "stats"

        [[sections.stats]]
        label = "Projects"
        target = 120

        [[sections]]
        id = "reviews"
        kind = "slider"

        [[sections.slides]]
        quote = "Shipped on time."
        author = "A. Client"
        rating = 5

        [[sections.slides]]
        quote = "Would hire again."
        author = "B. Client"
    "#;

    #[test]
    fn test_parse_sample() {
        let deck: Deck = toml::from_str(SAMPLE).unwrap();
        assert_eq!(deck.meta.brand, "ACME");
        assert_eq!(deck.nav.len(), 2);
        assert_eq!(deck.sections.len(), 4);
        assert!(deck.problems().is_empty());

        match &deck.sections[0].body {
            SectionBody::Hero {
                typing,
                decorations,
                ..
            } => {
                assert!(typing);
                assert_eq!(decorations.len(), 1);
                assert!((decorations[0].speed - 0.3).abs() < f64::EPSILON);
            }
            other => panic!("expected hero, got {:?}", other),
        }

        assert_eq!(deck.slider_slides().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_card_defaults() {
        let deck: Deck = toml::from_str(SAMPLE).unwrap();
        match &deck.sections[1].body {
            SectionBody::Cards { cards } => {
                assert_eq!(cards[0].reveal, RevealKind::SlideInLeft);
                assert_eq!(cards[0].delay_ms, 100);
            }
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_id_detected() {
        let deck: Deck = toml::from_str(
            r#"
            [meta]
            title = "t"
            brand = "b"

            [[sections]]
            id = "a"
            kind = "stats"
            stats = []

            [[sections]]
            id = "a"
            kind = "stats"
            stats = []
            "#,
        )
        .unwrap();
        let problems = deck.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("duplicate"));
        assert!(deck.validate().is_err());
    }

    #[test]
    fn test_dangling_nav_link_detected() {
        let deck: Deck = toml::from_str(
            r#"
            [meta]
            title = "t"
            brand = "b"

            [[nav]]
            label = "Nowhere"
            section = "missing"
            "#,
        )
        .unwrap();
        assert!(deck.problems()[0].contains("unknown section"));
    }

    #[test]
    fn test_section_index() {
        let deck: Deck = toml::from_str(SAMPLE).unwrap();
        assert_eq!(deck.section_index("reviews"), Some(3));
        assert_eq!(deck.section_index("nope"), None);
    }
}
