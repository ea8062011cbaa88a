pub mod config;
pub mod deck;
pub mod effects;
pub mod error;
pub mod slider;

pub use config::AppConfig;
pub use deck::Deck;
pub use error::{Error, Result};
pub use slider::{DragOutcome, DragTracker, SliderController};
