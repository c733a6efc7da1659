use serde::{Deserialize, Serialize};

/// One full-viewport section of the vertical deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Stable identifier, usable for deep links.
    pub id: String,
    /// Display title shown in the navigation bar.
    pub title: String,
    /// Foreground accent for navigation controls while this section is
    /// active. Hex string ("#rrggbb"); white when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    /// Background name override; a default gradient is cycled by index
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// One card of the horizontal carousel.
///
/// Only `client` and `metric` are rendered on the card face; the rest is
/// metadata carried through from the content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardInfo {
    pub slug: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet_illustration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_illustration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// A complete deck document: the ordered sections, the carousel cards, and
/// the background video asset sources (cycled by card index modulo count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub sections: Vec<SectionInfo>,
    #[serde(default)]
    pub cards: Vec<CardInfo>,
    #[serde(default)]
    pub video_assets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_optionals_default() {
        let card: CardInfo = serde_json::from_str(r#"{"slug": "acme"}"#).unwrap();
        assert_eq!(card.slug, "acme");
        assert!(card.client.is_empty());
        assert!(card.tags.is_empty());
        assert!(card.date.is_none());
    }

    #[test]
    fn deck_round_trips() {
        let deck = Deck {
            sections: vec![SectionInfo {
                id: "welcome".into(),
                title: "Welcome".into(),
                foreground_color: Some("#0a0a0a".into()),
                background: None,
            }],
            cards: vec![],
            video_assets: vec!["video-1.mp4".into()],
        };
        let json = serde_json::to_string(&deck).unwrap();
        let back: Deck = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deck);
    }
}
