/// Delay between deciding to reveal and actually flipping, so a
/// just-mounted asset can render a first frame instead of flashing black.
const REVEAL_DELAY_MS: f64 = 100.0;

/// Opacity of the active, ready asset while the layer is revealed.
pub const ACTIVE_OPACITY: f32 = 0.2;

/// Visibility state of the background video layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPhase {
    /// Owning section inactive, or never requested.
    Hidden,
    /// Section active, waiting on the first asset's readiness latch.
    WaitingForFirstAsset,
    /// Crossfading assets by index.
    Revealed,
}

/// Readiness-gated background layer: one asset per card index modulo the
/// asset count. The layer shows only while the owning section is active and
/// the designated first asset has been ready at least once (a one-way
/// latch). Per-asset readiness is recorded once and never cleared.
#[derive(Debug)]
pub struct VideoLayer {
    ready: Vec<bool>,
    first_asset_ready: bool,
    gated_on: bool,
    phase: LayerPhase,
    selector: usize,
    reveal_at: Option<f64>,
}

impl VideoLayer {
    pub fn new(asset_count: usize) -> Self {
        Self {
            ready: vec![false; asset_count],
            first_asset_ready: false,
            gated_on: false,
            phase: LayerPhase::Hidden,
            selector: 0,
            reveal_at: None,
        }
    }

    pub fn asset_count(&self) -> usize {
        self.ready.len()
    }

    pub fn phase(&self) -> LayerPhase {
        self.phase
    }

    /// The platform signaled sufficient buffered data for an asset.
    /// Idempotent; out-of-range indices are ignored. Only asset 0 trips
    /// the first-asset latch.
    pub fn asset_ready(&mut self, index: usize, now: f64) {
        let Some(slot) = self.ready.get_mut(index) else {
            return;
        };
        if *slot {
            return;
        }
        *slot = true;
        if index == 0 {
            self.first_asset_ready = true;
            tracing::debug!("first background asset ready");
            if self.gated_on && self.phase == LayerPhase::WaitingForFirstAsset {
                self.reveal_at = Some(now + REVEAL_DELAY_MS);
            }
        }
    }

    /// Owning-section gate from the vertical container. Gate-off hides
    /// immediately and abandons any pending reveal; gate-on while latched
    /// schedules the reveal, otherwise waits for the first asset.
    pub fn set_gate(&mut self, active: bool, now: f64) {
        if active == self.gated_on && active {
            return;
        }
        self.gated_on = active;
        if !active {
            self.phase = LayerPhase::Hidden;
            self.reveal_at = None;
            return;
        }
        self.phase = LayerPhase::WaitingForFirstAsset;
        if self.first_asset_ready {
            self.reveal_at = Some(now + REVEAL_DELAY_MS);
        }
    }

    /// Promote a scheduled reveal whose delay has elapsed.
    pub fn tick(&mut self, now: f64) {
        if let Some(at) = self.reveal_at
            && now >= at
            && self.gated_on
        {
            self.phase = LayerPhase::Revealed;
            self.reveal_at = None;
        }
    }

    /// Active asset selector, derived from the carousel's card index.
    pub fn set_selector(&mut self, card_index: usize) {
        self.selector = if self.ready.is_empty() {
            0
        } else {
            card_index % self.ready.len()
        };
    }

    pub fn selector(&self) -> usize {
        self.selector
    }

    /// Target opacity for one asset. The crossfade itself is the host's
    /// opacity tween; the engine only publishes the target: full intended
    /// opacity iff this asset is selected, individually ready, and the
    /// layer is revealed.
    pub fn opacity(&self, asset_index: usize) -> f32 {
        let ready = self.ready.get(asset_index).copied().unwrap_or(false);
        if self.phase == LayerPhase::Revealed && asset_index == self.selector && ready {
            ACTIVE_OPACITY
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed_layer(now: f64) -> VideoLayer {
        let mut layer = VideoLayer::new(4);
        layer.asset_ready(0, now);
        layer.set_gate(true, now);
        layer.tick(now + REVEAL_DELAY_MS);
        layer
    }

    #[test]
    fn waits_for_first_asset_then_reveals_after_delay() {
        let mut layer = VideoLayer::new(4);
        layer.set_gate(true, 0.0);
        assert_eq!(layer.phase(), LayerPhase::WaitingForFirstAsset);

        layer.asset_ready(0, 10.0);
        layer.tick(50.0);
        assert_eq!(layer.phase(), LayerPhase::WaitingForFirstAsset);
        layer.tick(110.0);
        assert_eq!(layer.phase(), LayerPhase::Revealed);
    }

    #[test]
    fn non_first_asset_never_trips_the_latch() {
        let mut layer = VideoLayer::new(4);
        layer.set_gate(true, 0.0);
        layer.asset_ready(2, 10.0);
        layer.tick(1000.0);
        assert_eq!(layer.phase(), LayerPhase::WaitingForFirstAsset);
        assert_eq!(layer.opacity(2), 0.0);
    }

    #[test]
    fn gate_off_hides_and_abandons_pending_reveal() {
        let mut layer = VideoLayer::new(4);
        layer.set_gate(true, 0.0);
        layer.asset_ready(0, 10.0);
        layer.set_gate(false, 20.0);
        assert_eq!(layer.phase(), LayerPhase::Hidden);
        layer.tick(500.0);
        assert_eq!(layer.phase(), LayerPhase::Hidden);
    }

    #[test]
    fn reentry_while_latched_reveals_after_the_short_delay() {
        let mut layer = revealed_layer(0.0);
        layer.set_gate(false, 1000.0);
        assert_eq!(layer.phase(), LayerPhase::Hidden);

        layer.set_gate(true, 2000.0);
        assert_eq!(layer.phase(), LayerPhase::WaitingForFirstAsset);
        layer.tick(2050.0);
        assert_eq!(layer.phase(), LayerPhase::WaitingForFirstAsset);
        layer.tick(2100.0);
        assert_eq!(layer.phase(), LayerPhase::Revealed);
    }

    #[test]
    fn readiness_is_idempotent_and_bounds_checked() {
        let mut layer = VideoLayer::new(2);
        layer.asset_ready(0, 0.0);
        layer.asset_ready(0, 0.0);
        layer.asset_ready(7, 0.0);
        assert_eq!(layer.opacity(7), 0.0);
    }

    #[test]
    fn opacity_requires_selection_readiness_and_reveal() {
        let mut layer = revealed_layer(0.0);
        layer.set_selector(1);
        // Selected but not ready.
        assert_eq!(layer.opacity(1), 0.0);
        // Ready but not selected.
        assert_eq!(layer.opacity(0), 0.0);

        layer.asset_ready(1, 500.0);
        assert_eq!(layer.opacity(1), ACTIVE_OPACITY);
        assert_eq!(layer.opacity(0), 0.0);
    }

    #[test]
    fn selector_wraps_by_asset_count() {
        let mut layer = VideoLayer::new(4);
        layer.set_selector(6);
        assert_eq!(layer.selector(), 2);
    }

    #[test]
    fn zero_assets_is_a_valid_terminal_state() {
        let mut layer = VideoLayer::new(0);
        layer.set_gate(true, 0.0);
        layer.asset_ready(0, 0.0);
        layer.tick(1000.0);
        // No first asset can ever arrive: permanently waiting, not a fault.
        assert_eq!(layer.phase(), LayerPhase::WaitingForFirstAsset);
        layer.set_selector(3);
        assert_eq!(layer.selector(), 0);
        assert_eq!(layer.opacity(0), 0.0);
    }
}
