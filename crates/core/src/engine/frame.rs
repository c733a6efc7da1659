/// Per-animation-frame recomputation gate.
///
/// Scroll and resize events arrive far faster than the display refreshes.
/// Hosts call [`FrameGate::request`] from every event and [`FrameGate::take`]
/// once per painted frame; at most one recomputation runs per frame, and it
/// observes the latest geometry rather than stale intermediate state.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a recomputation pending. Idempotent while one is outstanding;
    /// returns true only for the first request since the last [`take`].
    ///
    /// [`take`]: FrameGate::take
    pub fn request(&mut self) -> bool {
        let first = !self.pending;
        self.pending = true;
        first
    }

    /// Consume the pending flag. True means a recomputation should run now.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
