//! snapdeck-core: the dual-axis scroll-snap synchronization engine.
//!
//! Turns raw scroll offsets and live slot geometry into authoritative
//! section/card index state, keeps the vertical section surface and the
//! nested horizontal card carousel mutually consistent, and drives the
//! readiness-gated background layer and the directional entrance animation.
//!
//! The crate is headless: no platform calls, no timers. Hosts feed geometry
//! at event time and an `f64` millisecond clock, and render whatever the
//! engine reports.

pub mod deck;
pub mod engine;
pub mod motion;

pub use deck::{DeckError, demo_deck, parse_deck};
pub use engine::carousel::{CardCarousel, CardIndexChange};
pub use engine::frame::FrameGate;
pub use engine::section::{SectionDeck, SettlePoll};
pub use engine::tracker::{AxisTracker, IndexRule};
pub use engine::video::{LayerPhase, VideoLayer};
pub use motion::entrance_plan;
