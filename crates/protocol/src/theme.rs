use serde::{Deserialize, Serialize};

/// Linear RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Parse a `#rgb` or `#rrggbb` hex string.
pub fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16));
            let r = it.next()??;
            let g = it.next()??;
            let b = it.next()??;
            (r * 17, g * 17, b * 17)
        }
        6 => {
            let r = u32::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u32::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u32::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Color::rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ))
}

/// Default section backgrounds, cycled by section index when a section does
/// not declare its own.
pub const SECTION_BACKGROUNDS: [&str; 7] = [
    "gradient-bg",
    "gradient-bg-warm",
    "gradient-bg-chrome",
    "gradient-bg-electric",
    "gradient-bg-ocean",
    "gradient-bg-aurora",
    "gradient-bg-cosmic",
];

/// Background name for a section: its own declaration, or the default cycle.
pub fn section_background(index: usize, declared: Option<&str>) -> &str {
    declared.unwrap_or(SECTION_BACKGROUNDS[index % SECTION_BACKGROUNDS.len()])
}

/// Accent color for navigation controls: the active section's declared
/// foreground, or white.
pub fn nav_accent(declared: Option<&str>) -> Color {
    declared.and_then(parse_hex).unwrap_or(Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = parse_hex("#ff8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 0.0).abs() < 1e-6);
    }

    #[test]
    fn parses_short_hex() {
        let c = parse_hex("#fff").unwrap();
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_hex("ffffff").is_none());
        assert!(parse_hex("#zzzzzz").is_none());
        assert!(parse_hex("#ffff").is_none());
    }

    #[test]
    fn accent_defaults_to_white() {
        assert_eq!(nav_accent(None), Color::WHITE);
        assert_eq!(nav_accent(Some("not-a-color")), Color::WHITE);
    }

    #[test]
    fn background_cycle_wraps() {
        assert_eq!(section_background(0, None), "gradient-bg");
        assert_eq!(section_background(7, None), "gradient-bg");
        assert_eq!(section_background(8, None), "gradient-bg-warm");
        assert_eq!(section_background(2, Some("custom")), "custom");
    }
}
