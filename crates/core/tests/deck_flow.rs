//! Integration test: load a deck fixture and walk the full engine — settle,
//! section scrolling, carousel advancing, video gating — the way a host
//! drives it.

use snapdeck_core::engine::section::VIDEO_SECTION_INDEX;
use snapdeck_core::engine::video::ACTIVE_OPACITY;
use snapdeck_core::{CardCarousel, LayerPhase, SectionDeck, VideoLayer, parse_deck};
use snapdeck_protocol::{SlotBounds, Window};

const SECTION_H: f64 = 700.0;
const CARD_W: f64 = 100.0;
const CARD_GAP: f64 = 10.0;
const CAROUSEL_VIEW: f64 = 120.0;

fn section_slots(n: usize) -> Vec<SlotBounds> {
    (0..n)
        .map(|i| SlotBounds::new(i as f64 * SECTION_H, (i + 1) as f64 * SECTION_H))
        .collect()
}

fn card_slots(n: usize) -> Vec<SlotBounds> {
    (0..n)
        .map(|i| {
            let start = i as f64 * (CARD_W + CARD_GAP);
            SlotBounds::new(start, start + CARD_W)
        })
        .collect()
}

fn load_fixture() -> snapdeck_protocol::Deck {
    let data = include_bytes!("fixtures/demo-deck.json");
    parse_deck(data).expect("fixture deck should parse")
}

#[test]
fn fixture_deck_loads_with_defaults() {
    let deck = load_fixture();
    assert_eq!(deck.sections.len(), 3);
    assert_eq!(deck.cards.len(), 6);
    // The "labs" card declares no client: it falls back to the slug.
    assert_eq!(deck.cards[5].client, "labs");
}

#[test]
fn advance_walk_terminates_at_trailing_edge_without_skips() {
    let deck = load_fixture();
    let mut carousel = CardCarousel::new(deck.video_assets.len());
    let slots = card_slots(deck.cards.len());

    let mut offset = 0.0;
    carousel.observe(offset, Window::new(offset, offset + CAROUSEL_VIEW), &slots);
    let mut last_index = carousel.state().current_index;
    assert_eq!(last_index, 0);

    let mut visited = vec![0];
    for _ in 0..deck.cards.len() {
        let window = Window::new(offset, offset + CAROUSEL_VIEW);
        match carousel.advance_target(offset, window, &slots) {
            Some(target) => {
                offset = target;
                let window = Window::new(offset, offset + CAROUSEL_VIEW);
                carousel.observe(offset, window, &slots);
                let index = carousel.state().current_index;
                // Strictly increasing, no skips greater than one.
                assert_eq!(index, last_index + 1);
                last_index = index;
                visited.push(index);
            }
            None => break,
        }
    }

    assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
    assert!(carousel.state().at_trailing_edge);
    // One more advance is still a no-op.
    let window = Window::new(offset, offset + CAROUSEL_VIEW);
    assert_eq!(carousel.advance_target(offset, window, &slots), None);
}

#[test]
fn settle_then_scroll_then_gate_then_reveal() {
    let deck = load_fixture();
    let slots = section_slots(deck.sections.len());

    let mut sections = SectionDeck::new(deck.sections.clone(), 0.0);
    let mut carousel = CardCarousel::new(deck.video_assets.len());
    let mut video = VideoLayer::new(deck.video_assets.len());

    // Mount: hidden until the settle window passes, pinned to section 0
    // even if the host restored a stale offset.
    assert!(!sections.is_revealed());
    sections.observe(1400.0, Window::new(1400.0, 1400.0 + SECTION_H), &slots);
    sections.poll_settle(0.0);
    assert_eq!(sections.state().current_index, 0);
    sections.poll_settle(120.0);
    assert!(sections.is_revealed());
    sections.poll_settle(250.0);
    assert!(sections.is_settled());

    // Assets finish buffering while the user is still on section 0.
    video.asset_ready(0, 300.0);
    video.set_gate(sections.reveal_video(), 300.0);
    assert_eq!(video.phase(), LayerPhase::Hidden);

    // User scrolls to the work section: gate flips, reveal follows the
    // short delay.
    let offset = SECTION_H;
    sections.observe(offset, Window::new(offset, offset + SECTION_H), &slots);
    assert_eq!(sections.state().current_index, VIDEO_SECTION_INDEX);
    video.set_gate(sections.reveal_video(), 400.0);
    video.tick(510.0);
    assert_eq!(video.phase(), LayerPhase::Revealed);
    assert_eq!(video.opacity(0), ACTIVE_OPACITY);

    // Carousel advances; the index report drives both the parent and the
    // video selector.
    let cards = card_slots(deck.cards.len());
    let mut card_offset = 0.0;
    let window = Window::new(card_offset, card_offset + CAROUSEL_VIEW);
    if let Some(target) = carousel.advance_target(card_offset, window, &cards) {
        card_offset = target;
    }
    let window = Window::new(card_offset, card_offset + CAROUSEL_VIEW);
    let change = carousel
        .observe(card_offset, window, &cards)
        .expect("crossing a card boundary reports exactly once");
    sections.note_card_index(change.card_index);
    video.asset_ready(change.video_index, 600.0);
    video.set_selector(change.card_index);

    assert_eq!(sections.card_index(), 1);
    assert_eq!(video.opacity(1), ACTIVE_OPACITY);
    assert_eq!(video.opacity(0), 0.0);

    // Leaving the section hides the layer immediately.
    sections.observe(2.0 * SECTION_H, Window::new(2.0 * SECTION_H, 3.0 * SECTION_H), &slots);
    video.set_gate(sections.reveal_video(), 700.0);
    assert_eq!(video.phase(), LayerPhase::Hidden);
    assert_eq!(video.opacity(1), 0.0);

    // Coming back while latched re-reveals after the delay.
    sections.observe(SECTION_H, Window::new(SECTION_H, 2.0 * SECTION_H), &slots);
    video.set_gate(sections.reveal_video(), 800.0);
    video.tick(900.0);
    assert_eq!(video.phase(), LayerPhase::Revealed);
}
