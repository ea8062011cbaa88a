use std::path::Path;

use anyhow::{bail, Result};

use marquee_core::deck::SectionBody;
use marquee_core::Deck;

/// Parse and validate a deck, reporting every problem found
pub fn run(deck_path: &Path) -> Result<()> {
    let deck = Deck::load(deck_path)?;

    let problems = deck.problems();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("error: {}", problem);
        }
        bail!("{:?}: {} problem(s) found", deck_path, problems.len());
    }

    let slides = deck.slider_slides().map(|s| s.len()).unwrap_or(0);
    let images: usize = deck
        .sections
        .iter()
        .map(|s| match &s.body {
            SectionBody::Gallery { images } => images.len(),
            _ => 0,
        })
        .sum();

    println!(
        "{:?}: ok ({} sections, {} nav links, {} slides, {} images)",
        deck_path,
        deck.sections.len(),
        deck.nav.len(),
        slides,
        images
    );

    // Missing image files degrade to placeholders at runtime; still worth
    // flagging here
    let deck_dir = deck_path.parent().unwrap_or_else(|| Path::new("."));
    for section in &deck.sections {
        if let SectionBody::Gallery { images } = &section.body {
            for image in images {
                let resolved = if image.src.is_absolute() {
                    image.src.clone()
                } else {
                    deck_dir.join(&image.src)
                };
                if !resolved.exists() {
                    println!("warning: image {:?} not found", resolved);
                }
            }
        }
    }

    Ok(())
}
