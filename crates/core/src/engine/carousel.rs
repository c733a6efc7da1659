use snapdeck_protocol::{Direction, SlotBounds, TrackerState, Window};

use crate::engine::frame::FrameGate;
use crate::engine::tracker::{AxisTracker, IndexRule, overlaps};

/// Slack when deciding whether a card already sits past a window edge, so
/// snap-settled positions a few pixels shy of exact still count.
const BOUNDARY_TOLERANCE: f64 = 10.0;

/// Edge-triggered report: the carousel's authoritative card changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardIndexChange {
    /// New authoritative card index.
    pub card_index: usize,
    /// Active background asset selector: `card_index % asset_count`.
    pub video_index: usize,
}

/// State owner for the horizontal card carousel nested inside one vertical
/// section.
///
/// Runs the largest-overlap tracker, performs boundary-seeking advance and
/// retreat navigation (cards are not viewport-sized, so a fixed pixel delta
/// would drift), and reports index changes upward exactly once per change.
#[derive(Debug)]
pub struct CardCarousel {
    tracker: AxisTracker,
    gate: FrameGate,
    asset_count: usize,
    last_reported: usize,
}

impl CardCarousel {
    pub fn new(asset_count: usize) -> Self {
        Self {
            tracker: AxisTracker::new(IndexRule::LargestOverlap),
            gate: FrameGate::new(),
            asset_count,
            last_reported: 0,
        }
    }

    /// A scroll or resize event arrived; see [`FrameGate`].
    pub fn note_event(&mut self) -> bool {
        self.gate.request()
    }

    pub fn take_frame(&mut self) -> bool {
        self.gate.take()
    }

    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Active background asset for the current card.
    pub fn video_index(&self) -> usize {
        self.selector(self.tracker.state().current_index)
    }

    fn selector(&self, card_index: usize) -> usize {
        if self.asset_count == 0 {
            0
        } else {
            card_index % self.asset_count
        }
    }

    /// Recompute card state from live geometry. Returns `Some` exactly when
    /// the authoritative index changed since the last report, so ten scroll
    /// events between repaints still produce at most one upward callback.
    pub fn observe(
        &mut self,
        offset: f64,
        window: Window,
        slots: &[SlotBounds],
    ) -> Option<CardIndexChange> {
        let state = self.tracker.observe(offset, window, slots);
        if state.current_index == self.last_reported {
            return None;
        }
        self.last_reported = state.current_index;
        Some(CardIndexChange {
            card_index: state.current_index,
            video_index: self.selector(state.current_index),
        })
    }

    /// Offset that aligns slot 0 with the window's leading edge. Applied
    /// immediately on mount so the carousel starts deterministically at
    /// card 0 regardless of any inherited scroll position.
    pub fn initial_target(&self, offset: f64, window: Window, slots: &[SlotBounds]) -> Option<f64> {
        slots.first().map(|s| offset + s.start - window.start)
    }

    /// Find the next card that is at or beyond the trailing edge (or
    /// straddles it) and return the offset aligning it to the leading edge.
    /// `None` at the trailing edge: advance is a no-op there.
    pub fn advance_target(
        &mut self,
        offset: f64,
        window: Window,
        slots: &[SlotBounds],
    ) -> Option<f64> {
        self.tracker.force_direction(Direction::Forward);
        let slot = slots.iter().find(|s| {
            s.start >= window.end - BOUNDARY_TOLERANCE
                || (s.end > window.end && s.start < window.end)
        })?;
        Some(offset + slot.start - window.start)
    }

    /// Mirror of [`advance_target`]: the last card at or before the leading
    /// edge (or straddling it), aligned to the leading edge.
    ///
    /// [`advance_target`]: CardCarousel::advance_target
    pub fn retreat_target(
        &mut self,
        offset: f64,
        window: Window,
        slots: &[SlotBounds],
    ) -> Option<f64> {
        self.tracker.force_direction(Direction::Backward);
        let slot = slots.iter().rev().find(|s| {
            s.end <= window.start + BOUNDARY_TOLERANCE
                || (s.start < window.start && s.end > window.start)
        })?;
        Some(offset + slot.start - window.start)
    }

    /// True when every slot is fully visible or past the leading edge —
    /// i.e. there is nothing to advance toward.
    pub fn fully_visible(&self, window: Window, slots: &[SlotBounds]) -> bool {
        slots.iter().all(|s| overlaps(window, *s))
    }
}
