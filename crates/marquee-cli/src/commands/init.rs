use std::path::Path;

use anyhow::{bail, Result};

use marquee_core::AppConfig;

const STARTER_DECK: &str = r#"[meta]
title = "Acme Studio"
brand = "ACME"
tagline = "Software that ships"

[[nav]]
label = "Home"
section = "hero"

[[nav]]
label = "Services"
section = "services"

[[nav]]
label = "Numbers"
section = "numbers"

[[nav]]
label = "Reviews"
section = "reviews"

[[nav]]
label = "Contact"
section = "contact"

[[sections]]
id = "hero"
kind = "hero"
headline = "We build fast, dependable software"
typing = true
typing_speed_ms = 50
subtitle = "Small team, sharp tools, no ceremony."

[[sections.decorations]]
glyph = "✦"
col = 8
row = 1
speed = 0.5

[[sections.decorations]]
glyph = "·"
col = 70
row = 3
speed = 0.3

[[sections]]
id = "services"
kind = "cards"
title = "Services"

[[sections.cards]]
title = "Systems engineering"
body = "Storage engines, network services, and the plumbing in between."
reveal = "slide-in-left"

[[sections.cards]]
title = "Developer tooling"
body = "CLIs and build pipelines your team will actually enjoy."
reveal = "slide-in-right"
delay_ms = 150

[[sections.cards]]
title = "Performance work"
body = "Profiling, flame graphs, and the patience to read them."
reveal = "fade-in-up"
delay_ms = 300

[[sections]]
id = "numbers"
kind = "stats"
title = "By the numbers"

[[sections.stats]]
label = "Projects shipped"
target = 120
observe = "counter"

[[sections.stats]]
label = "Uptime %"
target = 99
observe = "counter"

[[sections.stats]]
label = "Coffees"
target = 8421
observe = "counter"

[[sections]]
id = "reviews"
kind = "slider"
title = "What clients say"

[[sections.slides]]
quote = "They shipped in half the time we budgeted, and it just worked."
author = "E. Okafor, CTO"
rating = 5

[[sections.slides]]
quote = "The first vendor that left our codebase better than they found it."
author = "M. Lindqvist"
rating = 5

[[sections.slides]]
quote = "Straight answers, fast turnarounds. Would hire again."
author = "R. Alvarez"
rating = 4

[[sections]]
id = "contact"
kind = "contact"
title = "Get in touch"
intro = "Tell us what you are building."

[[sections.links]]
label = "Email"
url = "mailto:hello@example.com"

[[sections.links]]
label = "GitHub"
url = "https://github.com/example"
"#;

const STARTER_CONFIG: &str = r#"# marquee configuration. Every key is optional; the commented values are
# the defaults.

[general]
# log_level = "info"

[ui]
# tick_rate_ms = 100

[ui.motion]
# smooth_enabled = true
# anchor_duration_ms = 800
# scroll_duration_ms = 150
# easing = "ease-in-out"   # linear | ease-in-out | cubic | quintic | expo-out
# animation_fps = 60

[ui.theme]
# name = "gruvbox-dark"    # gruvbox-dark | nord | one-dark

[slider]
# auto_advance_ms = 4000   # 0 disables auto-advance
# swipe_threshold = 8      # cells a drag must travel past to count as a swipe
# mouse_drag = true

[effects]
# reveal_duration_ms = 800
# counter_duration_ms = 2000
# typing_speed_ms = 50
# parallax_min_width = 80
"#;

/// Write a starter deck into `dir`, plus a commented config if none exists
pub fn run(dir: &Path) -> Result<()> {
    let deck_path = dir.join("marquee.toml");
    if deck_path.exists() {
        bail!("{:?} already exists, refusing to overwrite", deck_path);
    }

    std::fs::create_dir_all(dir)?;
    std::fs::write(&deck_path, STARTER_DECK)?;
    println!("Wrote {:?}", deck_path);

    let config_path = AppConfig::config_path();
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, STARTER_CONFIG)?;
        println!("Wrote {:?}", config_path);
    }

    println!("Play it with: marquee run {:?}", deck_path);
    Ok(())
}
