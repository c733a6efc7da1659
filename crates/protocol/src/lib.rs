pub mod content;
pub mod motion;
pub mod theme;
pub mod types;

pub use content::{CardInfo, Deck, SectionInfo};
pub use theme::Color;
pub use types::{Direction, NavigationRequest, SlotBounds, TrackerState, Window};
