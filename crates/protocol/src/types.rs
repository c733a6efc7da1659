use serde::{Deserialize, Serialize};

/// Direction of travel along a scroll axis.
///
/// `Forward` is down for the vertical surface and right (in LTR terms) for
/// the horizontal carousel. Direction only flips on a strictly signed offset
/// delta; a zero delta carries no information and retains the prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The opposite travel direction.
    pub fn inverted(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// The visible content window along one axis, inset by any leading/trailing
/// padding. Coordinates share a space with the slot bounds passed in the same
/// observation; only deltas and comparisons matter, so hosts may use content
/// coordinates or viewport coordinates as long as they are consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Visible extent of the window.
    pub fn extent(&self) -> f64 {
        self.end - self.start
    }
}

/// One slot's bounding interval along the tracked axis, read live from the
/// render surface at observation time (never cached across layouts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotBounds {
    pub start: f64,
    pub end: f64,
}

impl SlotBounds {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn extent(&self) -> f64 {
        self.end - self.start
    }
}

/// Per-axis derived state published by a tracker after each observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Authoritative slot index, always within `[0, slot_count - 1]`
    /// (0 when there are no slots).
    pub current_index: usize,
    /// True iff no slot before `current_index` is visible.
    pub at_leading_edge: bool,
    /// True iff no slot after `current_index` is visible.
    pub at_trailing_edge: bool,
    /// Sign of the most recent net scroll delta.
    pub direction: Direction,
}

impl TrackerState {
    /// State before any geometry has been observed: index 0, both edges,
    /// traveling forward.
    pub fn initial() -> Self {
        Self {
            current_index: 0,
            at_leading_edge: true,
            at_trailing_edge: true,
            direction: Direction::Forward,
        }
    }
}

/// A transient scroll command produced by navigation. Not retained state —
/// the host performs the scroll and discards the request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// Target scroll offset along the axis.
    pub offset: f64,
    /// Skip the smooth animation (reduced-motion preference, or the
    /// deterministic initial alignment).
    pub immediate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_inversion() {
        assert_eq!(Direction::Forward.inverted(), Direction::Backward);
        assert_eq!(Direction::Backward.inverted(), Direction::Forward);
    }

    #[test]
    fn initial_state_is_clamped_and_edged() {
        let s = TrackerState::initial();
        assert_eq!(s.current_index, 0);
        assert!(s.at_leading_edge && s.at_trailing_edge);
    }

    #[test]
    fn tracker_state_round_trips_as_json() {
        let s = TrackerState {
            current_index: 3,
            at_leading_edge: false,
            at_trailing_edge: true,
            direction: Direction::Backward,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: TrackerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
