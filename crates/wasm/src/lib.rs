use std::sync::Mutex;

use snapdeck_core::{CardCarousel, SectionDeck, VideoLayer};
use snapdeck_protocol::{SlotBounds, Window};
use wasm_bindgen::prelude::*;

/// One hosted deck: the vertical surface, its nested carousel, and the
/// gated video layer, driven from JavaScript by handle.
struct DeckSession {
    sections: SectionDeck,
    carousel: CardCarousel,
    video: VideoLayer,
}

static SESSIONS: Mutex<Vec<DeckSession>> = Mutex::new(Vec::new());

fn with_session<T>(
    handle: usize,
    f: impl FnOnce(&mut DeckSession) -> Result<T, JsError>,
) -> Result<T, JsError> {
    let mut sessions = SESSIONS.lock().unwrap();
    let session = sessions
        .get_mut(handle)
        .ok_or_else(|| JsError::new("invalid deck handle"))?;
    f(session)
}

fn parse_slots(slots_json: &str) -> Result<Vec<SlotBounds>, JsError> {
    serde_json::from_str(slots_json).map_err(|e| JsError::new(&e.to_string()))
}

/// Parse a deck from bytes (JSON) and start hosting it. Returns a handle
/// (index) for later calls; `now_ms` starts the settle burst.
#[wasm_bindgen]
pub fn create_deck(data: &[u8], now_ms: f64) -> Result<usize, JsError> {
    let deck = snapdeck_core::parse_deck(data).map_err(|e| JsError::new(&e.to_string()))?;
    let mut sessions = SESSIONS.lock().unwrap();
    let idx = sessions.len();
    sessions.push(DeckSession {
        sections: SectionDeck::new(deck.sections.clone(), now_ms),
        carousel: CardCarousel::new(deck.video_assets.len()),
        video: VideoLayer::new(deck.video_assets.len()),
    });
    Ok(idx)
}

/// Drive the mount-time settle burst. Returns JSON:
/// `{"corrections": n, "just_revealed": bool, "revealed": bool, "settled": bool}`.
/// Each correction demands the caller force its scroll offset to zero.
#[wasm_bindgen]
pub fn poll_settle(handle: usize, now_ms: f64) -> Result<String, JsError> {
    with_session(handle, |s| {
        let poll = s.sections.poll_settle(now_ms);
        serde_json::to_string(&serde_json::json!({
            "corrections": poll.corrections,
            "just_revealed": poll.just_revealed,
            "revealed": s.sections.is_revealed(),
            "settled": s.sections.is_settled(),
        }))
        .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Report a vertical scroll or resize event. Returns true if the caller
/// should schedule one recomputation for the next animation frame.
#[wasm_bindgen]
pub fn note_vertical_event(handle: usize) -> Result<bool, JsError> {
    with_session(handle, |s| Ok(s.sections.note_event()))
}

#[wasm_bindgen]
pub fn note_horizontal_event(handle: usize) -> Result<bool, JsError> {
    with_session(handle, |s| Ok(s.carousel.note_event()))
}

/// Recompute vertical section state from live geometry. `slots_json` is a
/// JSON array of `{"start": f, "end": f}` in the same coordinate space as
/// `offset` and the window. Returns the tracker state as JSON.
#[wasm_bindgen]
pub fn observe_vertical(
    handle: usize,
    offset: f64,
    window_start: f64,
    window_end: f64,
    slots_json: &str,
) -> Result<String, JsError> {
    let slots = parse_slots(slots_json)?;
    with_session(handle, |s| {
        let state = s
            .sections
            .observe(offset, Window::new(window_start, window_end), &slots);
        serde_json::to_string(&state).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Recompute carousel state. Returns JSON `{"state": ..., "change": ...}`
/// where `change` is non-null exactly when the authoritative card index
/// changed; the caller must then move the video selector and may deep-link.
#[wasm_bindgen]
pub fn observe_horizontal(
    handle: usize,
    offset: f64,
    window_start: f64,
    window_end: f64,
    slots_json: &str,
) -> Result<String, JsError> {
    let slots = parse_slots(slots_json)?;
    with_session(handle, |s| {
        let change = s
            .carousel
            .observe(offset, Window::new(window_start, window_end), &slots);
        if let Some(ch) = change {
            s.sections.note_card_index(ch.card_index);
            s.video.set_selector(ch.card_index);
        }
        let change_json = change.map(|ch| {
            serde_json::json!({
                "card_index": ch.card_index,
                "video_index": ch.video_index,
            })
        });
        serde_json::to_string(&serde_json::json!({
            "state": s.carousel.state(),
            "change": change_json,
        }))
        .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Target offset that advances the carousel one boundary forward, or null
/// at the trailing edge.
#[wasm_bindgen]
pub fn advance_target(
    handle: usize,
    offset: f64,
    window_start: f64,
    window_end: f64,
    slots_json: &str,
) -> Result<Option<f64>, JsError> {
    let slots = parse_slots(slots_json)?;
    with_session(handle, |s| {
        Ok(s.carousel
            .advance_target(offset, Window::new(window_start, window_end), &slots))
    })
}

#[wasm_bindgen]
pub fn retreat_target(
    handle: usize,
    offset: f64,
    window_start: f64,
    window_end: f64,
    slots_json: &str,
) -> Result<Option<f64>, JsError> {
    let slots = parse_slots(slots_json)?;
    with_session(handle, |s| {
        Ok(s.carousel
            .retreat_target(offset, Window::new(window_start, window_end), &slots))
    })
}

/// Offset that aligns card 0 with the window's leading edge, applied once
/// on mount for a deterministic start.
#[wasm_bindgen]
pub fn initial_target(
    handle: usize,
    offset: f64,
    window_start: f64,
    window_end: f64,
    slots_json: &str,
) -> Result<Option<f64>, JsError> {
    let slots = parse_slots(slots_json)?;
    with_session(handle, |s| {
        Ok(s.carousel
            .initial_target(offset, Window::new(window_start, window_end), &slots))
    })
}

/// Navigation request for "jump to section N" as JSON
/// `{"offset": f, "immediate": bool}`.
#[wasm_bindgen]
pub fn jump_target(
    handle: usize,
    index: usize,
    viewport_extent: f64,
    reduced_motion: bool,
) -> Result<String, JsError> {
    with_session(handle, |s| {
        let req = s.sections.jump_target(index, viewport_extent, reduced_motion);
        serde_json::to_string(&req).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// A video asset finished buffering its first frame.
#[wasm_bindgen]
pub fn asset_ready(handle: usize, index: usize, now_ms: f64) -> Result<(), JsError> {
    with_session(handle, |s| {
        s.video.asset_ready(index, now_ms);
        Ok(())
    })
}

/// Re-key the video gate off the current section and run due reveals.
/// Call once per animation frame after any `observe_vertical`.
#[wasm_bindgen]
pub fn sync_video(handle: usize, now_ms: f64) -> Result<(), JsError> {
    with_session(handle, |s| {
        s.video.set_gate(s.sections.reveal_video(), now_ms);
        s.video.tick(now_ms);
        Ok(())
    })
}

/// Target opacity for one video layer (0.0 hidden, 0.2 active).
#[wasm_bindgen]
pub fn video_opacity(handle: usize, index: usize) -> Result<f32, JsError> {
    with_session(handle, |s| Ok(s.video.opacity(index)))
}

/// Current authoritative card index, as last reported by the carousel.
#[wasm_bindgen]
pub fn card_index(handle: usize) -> Result<usize, JsError> {
    with_session(handle, |s| Ok(s.sections.card_index()))
}

/// Accent color of the active section as JSON `{"r":..,"g":..,"b":..,"a":..}`.
#[wasm_bindgen]
pub fn accent_color(handle: usize) -> Result<String, JsError> {
    with_session(handle, |s| {
        serde_json::to_string(&s.sections.accent()).map_err(|e| JsError::new(&e.to_string()))
    })
}
