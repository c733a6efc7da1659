use snapdeck_protocol::{Direction, SlotBounds, TrackerState, Window};

/// Sub-pixel tolerance when testing slot/window overlap.
const OVERLAP_TOLERANCE: f64 = 1.0;

/// How the authoritative index is derived from geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRule {
    /// `floor(offset / extent + 0.5)`, clamped. Assumes uniform
    /// viewport-sized slots (full-page sections), which makes it robust
    /// to fractional overshoot from momentum scrolling.
    RoundedOffset,
    /// The slot with the greatest visible overlap against the window,
    /// ties toward the lower index. Correct for variable-width slots
    /// (carousel cards across layout breakpoints).
    LargestOverlap,
}

/// Per-axis index tracker. Pure geometry: each observation reads the
/// current offset, the padded content window, and the slot bounds fresh,
/// and publishes a new [`TrackerState`]. Never touches the surface.
#[derive(Debug)]
pub struct AxisTracker {
    rule: IndexRule,
    last_offset: f64,
    state: TrackerState,
}

impl AxisTracker {
    pub fn new(rule: IndexRule) -> Self {
        Self {
            rule,
            last_offset: 0.0,
            state: TrackerState::initial(),
        }
    }

    /// Most recently published state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Forget everything and return to the initial pose. Used by the
    /// settle sequence's forced corrections so the first real scroll
    /// infers direction from zero.
    pub fn reset(&mut self) {
        self.last_offset = 0.0;
        self.state = TrackerState::initial();
    }

    /// Pin the direction ahead of a programmatic scroll, before the
    /// surface actually moves.
    pub fn force_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
    }

    /// Recompute state from live geometry.
    pub fn observe(
        &mut self,
        offset: f64,
        window: Window,
        slots: &[SlotBounds],
    ) -> TrackerState {
        // Direction: strictly signed delta only; a zero delta carries no
        // information and retains the prior value.
        if offset > self.last_offset {
            self.state.direction = Direction::Forward;
        } else if offset < self.last_offset {
            self.state.direction = Direction::Backward;
        }
        self.last_offset = offset;

        if slots.is_empty() {
            self.state.current_index = 0;
            self.state.at_leading_edge = true;
            self.state.at_trailing_edge = true;
            return self.state;
        }

        let (first_visible, last_visible) = visible_range(window, slots);

        self.state.current_index = match self.rule {
            IndexRule::RoundedOffset => rounded_index(offset, window.extent(), slots.len()),
            IndexRule::LargestOverlap => match first_visible {
                // No new data: keep the prior index (clamped in case the
                // slot list shrank).
                None => self.state.current_index.min(slots.len() - 1),
                Some(_) => largest_overlap_index(window, slots),
            },
        };

        self.state.at_leading_edge = first_visible.is_none_or(|i| i == 0);
        self.state.at_trailing_edge = last_visible.is_none_or(|i| i == slots.len() - 1);
        self.state
    }
}

/// A slot overlaps the window when it strictly crosses both insets, with
/// one unit of tolerance to absorb sub-pixel rounding.
pub(crate) fn overlaps(window: Window, slot: SlotBounds) -> bool {
    slot.start < window.end - OVERLAP_TOLERANCE && slot.end > window.start + OVERLAP_TOLERANCE
}

fn visible_range(window: Window, slots: &[SlotBounds]) -> (Option<usize>, Option<usize>) {
    let mut first = None;
    let mut last = None;
    for (i, slot) in slots.iter().enumerate() {
        if overlaps(window, *slot) {
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i);
        }
    }
    (first, last)
}

fn rounded_index(offset: f64, extent: f64, slot_count: usize) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    // Round half up, matching the observed snap behavior.
    let raw = (offset / extent + 0.5).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(slot_count - 1)
    }
}

fn largest_overlap_index(window: Window, slots: &[SlotBounds]) -> usize {
    let mut best = 0;
    let mut best_area = 0.0_f64;
    for (i, slot) in slots.iter().enumerate() {
        let visible_start = slot.start.max(window.start);
        let visible_end = slot.end.min(window.end);
        let area = (visible_end - visible_start).max(0.0);
        // Strict comparison keeps the lower index on ties.
        if area > best_area {
            best_area = area;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_slots(count: usize, extent: f64) -> Vec<SlotBounds> {
        (0..count)
            .map(|i| SlotBounds::new(i as f64 * extent, (i + 1) as f64 * extent))
            .collect()
    }

    #[test]
    fn zero_slots_is_safe() {
        let mut t = AxisTracker::new(IndexRule::RoundedOffset);
        let s = t.observe(500.0, Window::new(500.0, 1100.0), &[]);
        assert_eq!(s.current_index, 0);
        assert!(s.at_leading_edge && s.at_trailing_edge);
    }

    #[test]
    fn rounded_index_table() {
        let h = 600.0;
        let slots = uniform_slots(3, h);
        let mut t = AxisTracker::new(IndexRule::RoundedOffset);

        let at = |t: &mut AxisTracker, offset: f64| {
            t.observe(offset, Window::new(offset, offset + h), &slots)
                .current_index
        };
        assert_eq!(at(&mut t, 0.0), 0);
        assert_eq!(at(&mut t, h), 1);
        // Round-half-up: exactly between 1 and 2 resolves to 2.
        assert_eq!(at(&mut t, 1.5 * h), 2);
        // Momentum overshoot past the last section clamps.
        assert_eq!(at(&mut t, 5.0 * h), 2);
        assert_eq!(at(&mut t, -50.0), 0);
    }

    #[test]
    fn rounded_index_is_always_in_range() {
        let h = 480.0;
        let slots = uniform_slots(4, h);
        let mut t = AxisTracker::new(IndexRule::RoundedOffset);
        for step in -10..60 {
            let offset = step as f64 * 37.5;
            let s = t.observe(offset, Window::new(offset, offset + h), &slots);
            assert!(s.current_index < 4);
        }
    }

    #[test]
    fn direction_persists_across_zero_delta() {
        let slots = uniform_slots(3, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);
        let dirs: Vec<Direction> = [0.0, 10.0, 10.0, 5.0]
            .iter()
            .map(|&o| {
                t.observe(o, Window::new(o, o + 100.0), &slots).direction
            })
            .collect();
        assert_eq!(
            dirs,
            vec![
                Direction::Forward,
                Direction::Forward,
                Direction::Forward,
                Direction::Backward,
            ]
        );
    }

    #[test]
    fn largest_overlap_picks_most_visible() {
        // Window shows 80 units of slot 1 and 20 of slot 2.
        let slots = uniform_slots(3, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);
        let s = t.observe(120.0, Window::new(120.0, 220.0), &slots);
        assert_eq!(s.current_index, 1);
        assert!(!s.at_leading_edge);
        assert!(!s.at_trailing_edge);
    }

    #[test]
    fn largest_overlap_ties_break_low() {
        // Window straddles slots 0 and 1 exactly evenly.
        let slots = uniform_slots(2, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);
        let s = t.observe(50.0, Window::new(50.0, 150.0), &slots);
        assert_eq!(s.current_index, 0);
    }

    #[test]
    fn no_overlap_keeps_index_and_flags_both_edges() {
        let slots = uniform_slots(3, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);
        t.observe(110.0, Window::new(110.0, 210.0), &slots);
        assert_eq!(t.state().current_index, 1);

        // Scrolled into the far-right padding: nothing overlaps.
        let s = t.observe(900.0, Window::new(900.0, 1000.0), &slots);
        assert_eq!(s.current_index, 1);
        assert!(s.at_leading_edge && s.at_trailing_edge);
    }

    #[test]
    fn edges_track_first_and_last_visible() {
        let slots = uniform_slots(3, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);

        let s = t.observe(0.0, Window::new(0.0, 100.0), &slots);
        assert!(s.at_leading_edge);
        assert!(!s.at_trailing_edge);

        let s = t.observe(200.0, Window::new(200.0, 300.0), &slots);
        assert!(!s.at_leading_edge);
        assert!(s.at_trailing_edge);
    }

    #[test]
    fn sub_pixel_spill_does_not_count_as_visible() {
        let slots = uniform_slots(2, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);
        // Slot 1 pokes 0.5 units into the window: within tolerance.
        let s = t.observe(0.5, Window::new(0.5, 100.5), &slots);
        assert!(s.at_leading_edge);
        assert!(!s.at_trailing_edge);
    }

    #[test]
    fn forced_direction_sticks_until_contradicted() {
        let slots = uniform_slots(3, 100.0);
        let mut t = AxisTracker::new(IndexRule::LargestOverlap);
        t.observe(50.0, Window::new(50.0, 150.0), &slots);
        t.force_direction(Direction::Backward);
        // Same offset again: zero delta, forced direction survives.
        let s = t.observe(50.0, Window::new(50.0, 150.0), &slots);
        assert_eq!(s.direction, Direction::Backward);
        let s = t.observe(60.0, Window::new(60.0, 160.0), &slots);
        assert_eq!(s.direction, Direction::Forward);
    }
}
