//! Scroll-driven page effects.
//!
//! Every effect here is an independent observer over page state: it owns no
//! reference to any other effect, and an absent target simply leaves it
//! inert. The pure pieces (easing, timing, counter, typing) take explicit
//! elapsed/now arguments so they can be sampled in tests without a clock.

pub mod counter;
pub mod easing;
pub mod header;
pub mod lazy;
pub mod menu;
pub mod observer;
pub mod parallax;
pub mod reveal;
pub mod timing;
pub mod typing;

pub use counter::CounterAnimation;
pub use easing::EasingKind;
pub use header::HeaderState;
pub use lazy::{LazyState, LazyStore};
pub use menu::MenuOverlay;
pub use observer::{Edge, RegionKey, RegionSpan, Trigger, Viewport, ViewportObserver};
pub use reveal::{Reveal, RevealPhase};
pub use typing::Typewriter;
