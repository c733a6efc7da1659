//! Animation phase descriptors.
//!
//! These are plain data: the core builds an [`EntrancePlan`] from a travel
//! direction, and hosts sample it over time to actually move and fade
//! elements. Times are in seconds. Horizontal offsets (`x`) are fractions of
//! the viewport width; vertical offsets (`y`) are logical units.

use serde::{Deserialize, Serialize};

/// Easing curve for a timed transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    /// Accelerating entry, used for exits.
    EaseIn,
    /// Cubic bezier control points (x1, y1, x2, y2).
    Bezier(f32, f32, f32, f32),
}

/// A resting pose for one animated element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Keyframe {
    /// Fully visible, at rest.
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::REST
        }
    }
}

/// When and how fast a keyframe transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
}

/// Stagger policy for a group's children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Gap between successive children.
    pub interval: f32,
    /// Delay before the first child starts.
    pub children_delay: f32,
    /// Run children last-to-first (exit phases).
    pub reversed: bool,
}

/// Entrance/exit description for a single element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementPhase {
    pub hidden: Keyframe,
    pub visible: Keyframe,
    pub exit: Keyframe,
    pub enter: Timing,
    pub leave: Timing,
}

/// Entrance/exit description for a container that fades as a whole and
/// staggers its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupPhase {
    pub visible_opacity: f32,
    pub enter_delay: f32,
    pub enter: Stagger,
    pub leave: Stagger,
}

/// The full staggered plan for one card's sub-elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntrancePlan {
    pub container: GroupPhase,
    pub title: ElementPhase,
    pub metric: ElementPhase,
    pub tag_group: GroupPhase,
    pub tag_item: ElementPhase,
}
