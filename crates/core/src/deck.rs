//! Deck content loading.
//!
//! The engine treats content as an external collaborator: an ordered list
//! of section and card records. This module parses a JSON deck document,
//! normalizes per-card defaults, and provides the built-in demo deck so
//! every host runs without files.

use snapdeck_protocol::{CardInfo, Deck, SectionInfo};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("invalid deck JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("deck has no sections")]
    NoSections,
    #[error("card {index} has an empty slug")]
    EmptySlug { index: usize },
    #[error("duplicate card slug: {slug}")]
    DuplicateSlug { slug: String },
}

/// Parse and validate a deck document.
///
/// Cards default like the original content source: a missing client falls
/// back to the slug; the metric may be empty.
pub fn parse_deck(data: &[u8]) -> Result<Deck, DeckError> {
    let mut deck: Deck = serde_json::from_slice(data)?;

    if deck.sections.is_empty() {
        return Err(DeckError::NoSections);
    }

    let mut seen = std::collections::HashSet::new();
    for (index, card) in deck.cards.iter_mut().enumerate() {
        if card.slug.is_empty() {
            return Err(DeckError::EmptySlug { index });
        }
        if !seen.insert(card.slug.clone()) {
            return Err(DeckError::DuplicateSlug {
                slug: card.slug.clone(),
            });
        }
        if card.client.is_empty() {
            card.client = card.slug.clone();
        }
    }

    tracing::debug!(
        sections = deck.sections.len(),
        cards = deck.cards.len(),
        assets = deck.video_assets.len(),
        "deck loaded"
    );
    Ok(deck)
}

/// The built-in three-section, six-card demo deck.
pub fn demo_deck() -> Deck {
    let section = |id: &str, title: &str, fg: Option<&str>| SectionInfo {
        id: id.into(),
        title: title.into(),
        foreground_color: fg.map(Into::into),
        background: None,
    };
    let card = |slug: &str, client: &str, metric: &str, tags: &[&str]| CardInfo {
        slug: slug.into(),
        client: client.into(),
        metric: metric.into(),
        tags: tags.iter().map(|&t| t.into()).collect(),
        ..CardInfo::default()
    };

    Deck {
        sections: vec![
            section("welcome", "Welcome", None),
            section("work", "Work", Some("#0a0a0a")),
            section("connect", "Connect", None),
        ],
        cards: vec![
            card("streaming", "NBCUniversal", "3x faster playback start", &["video", "web"]),
            card("banking", "JPMorgan", "40% fewer support calls", &["fintech", "design"]),
            card("records", "Blue Note Records", "2M monthly listeners", &["audio", "brand"]),
            card("insurance", "FM Global", "12% conversion lift", &["b2b", "platform"]),
            card("agency", "Dentsu", "8 markets launched", &["campaign", "motion"]),
            card("labs", "Skunkworks", "0 to 1 in six weeks", &["prototype"]),
        ],
        video_assets: vec![
            "video-4.mp4".into(),
            "video-3.mp4".into(),
            "video-2.mp4".into(),
            "video-1.mp4".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_deck_is_valid() {
        let json = serde_json::to_vec(&demo_deck()).unwrap();
        let deck = parse_deck(&json).unwrap();
        assert_eq!(deck.sections.len(), 3);
        assert_eq!(deck.cards.len(), 6);
        assert_eq!(deck.video_assets.len(), 4);
    }

    #[test]
    fn client_defaults_to_slug() {
        let deck = parse_deck(
            br#"{"sections": [{"id": "a", "title": "A"}], "cards": [{"slug": "acme"}]}"#,
        )
        .unwrap();
        assert_eq!(deck.cards[0].client, "acme");
        assert!(deck.cards[0].metric.is_empty());
    }

    #[test]
    fn rejects_sectionless_decks() {
        let err = parse_deck(br#"{"sections": []}"#).unwrap_err();
        assert!(matches!(err, DeckError::NoSections));
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = parse_deck(
            br#"{"sections": [{"id": "a", "title": "A"}],
                 "cards": [{"slug": "x"}, {"slug": "x"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::DuplicateSlug { .. }));
    }

    #[test]
    fn rejects_empty_slugs() {
        let err = parse_deck(
            br#"{"sections": [{"id": "a", "title": "A"}], "cards": [{"slug": ""}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::EmptySlug { index: 0 }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_deck(b"not json").unwrap_err(),
            DeckError::Parse(_)
        ));
    }
}
