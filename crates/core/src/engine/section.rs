use snapdeck_protocol::theme::{self, Color};
use snapdeck_protocol::{NavigationRequest, SectionInfo, SlotBounds, TrackerState, Window};

use crate::engine::frame::FrameGate;
use crate::engine::tracker::{AxisTracker, IndexRule};

/// The section whose child carousel owns the background video layer.
pub const VIDEO_SECTION_INDEX: usize = 1;

/// Correction deadlines (ms after mount) for defeating late browser-driven
/// scroll restoration. The surface is revealed once the 100ms correction
/// has fired.
const SETTLE_DEADLINES_MS: [f64; 4] = [0.0, 50.0, 100.0, 200.0];
const REVEAL_AT_MS: f64 = 100.0;

/// Result of polling the settle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePoll {
    /// How many corrections came due: each one demands the host force the
    /// scroll offset back to zero.
    pub corrections: usize,
    /// The reveal threshold was crossed by this poll.
    pub just_revealed: bool,
}

/// Mount-time settling: a short burst of repeated scroll-to-zero
/// corrections. Owns no timers — the host polls with its clock, and
/// dropping the deck cancels whatever has not fired.
#[derive(Debug)]
struct SettleSequence {
    started_at: f64,
    fired: usize,
    revealed: bool,
}

impl SettleSequence {
    fn new(now: f64) -> Self {
        Self {
            started_at: now,
            fired: 0,
            revealed: false,
        }
    }

    fn poll(&mut self, now: f64) -> SettlePoll {
        let elapsed = now - self.started_at;
        let due = SETTLE_DEADLINES_MS
            .iter()
            .filter(|&&d| elapsed >= d)
            .count();
        let corrections = due.saturating_sub(self.fired);
        self.fired = due;

        let just_revealed = !self.revealed && elapsed >= REVEAL_AT_MS;
        if just_revealed {
            self.revealed = true;
        }
        SettlePoll {
            corrections,
            just_revealed,
        }
    }

    fn is_settled(&self) -> bool {
        self.fired == SETTLE_DEADLINES_MS.len()
    }
}

/// State owner for the vertical, full-viewport section surface.
///
/// Runs the rounded-offset tracker, exposes jump-to-section navigation,
/// gates the background video layer to the carousel section, and receives
/// the carousel's index reports (one-directional: the carousel never reads
/// back into this struct).
#[derive(Debug)]
pub struct SectionDeck {
    sections: Vec<SectionInfo>,
    tracker: AxisTracker,
    settle: SettleSequence,
    gate: FrameGate,
    card_index: usize,
}

impl SectionDeck {
    pub fn new(sections: Vec<SectionInfo>, now: f64) -> Self {
        Self {
            sections,
            tracker: AxisTracker::new(IndexRule::RoundedOffset),
            settle: SettleSequence::new(now),
            gate: FrameGate::new(),
            card_index: 0,
        }
    }

    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Drive the mount-time settle burst. Each due correction resets the
    /// tracker to section 0; the host must also force its scroll offset to
    /// zero once per returned correction.
    pub fn poll_settle(&mut self, now: f64) -> SettlePoll {
        let poll = self.settle.poll(now);
        if poll.corrections > 0 {
            self.tracker.reset();
        }
        if poll.just_revealed {
            tracing::debug!("section surface settled, revealing");
        }
        poll
    }

    /// The surface may be shown and interacted with. False during the
    /// settling window, so users never see the restoration fight.
    pub fn is_revealed(&self) -> bool {
        self.settle.revealed
    }

    pub fn is_settled(&self) -> bool {
        self.settle.is_settled()
    }

    /// A scroll or resize event arrived. Returns true if the host should
    /// schedule one recomputation for the next frame (at most one is ever
    /// outstanding).
    pub fn note_event(&mut self) -> bool {
        self.gate.request()
    }

    /// Consume the pending-recomputation flag at frame time.
    pub fn take_frame(&mut self) -> bool {
        self.gate.take()
    }

    /// Recompute section state from live geometry.
    pub fn observe(
        &mut self,
        offset: f64,
        window: Window,
        slots: &[SlotBounds],
    ) -> TrackerState {
        self.tracker.observe(offset, window, slots)
    }

    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Target offset for "jump to section N". Out-of-range indices clamp
    /// silently; reduced motion makes the jump immediate.
    pub fn jump_target(
        &self,
        index: usize,
        viewport_extent: f64,
        reduced_motion: bool,
    ) -> NavigationRequest {
        let clamped = index.min(self.sections.len().saturating_sub(1));
        NavigationRequest {
            offset: clamped as f64 * viewport_extent,
            immediate: reduced_motion,
        }
    }

    /// True only while the carousel section is the current one; the video
    /// layer keys its gate off this.
    pub fn reveal_video(&self) -> bool {
        self.tracker.state().current_index == VIDEO_SECTION_INDEX
    }

    /// Upward report from the nested carousel. Stored for outbound
    /// exposure (deep-linking, debugging); never mutated from below.
    pub fn note_card_index(&mut self, index: usize) {
        self.card_index = index;
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    /// Accent color for all navigation controls, from the active section.
    pub fn accent(&self) -> Color {
        let active = self.sections.get(self.tracker.state().current_index);
        theme::nav_accent(active.and_then(|s| s.foreground_color.as_deref()))
    }

    /// Background name for a section slot.
    pub fn background(&self, index: usize) -> &str {
        let declared = self
            .sections
            .get(index)
            .and_then(|s| s.background.as_deref());
        theme::section_background(index, declared)
    }
}
