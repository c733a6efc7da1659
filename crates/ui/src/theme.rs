use egui::Color32;
use snapdeck_protocol::theme::Color;

/// Convert a protocol color to an egui color.
pub fn to_color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (c.r * 255.0).round() as u8,
        (c.g * 255.0).round() as u8,
        (c.b * 255.0).round() as u8,
        (c.a * 255.0).round() as u8,
    )
}

/// Resolve a section background name to a vertical gradient color pair.
pub fn background_gradient(name: &str) -> (Color32, Color32) {
    match name {
        "gradient-bg-warm" => (
            Color32::from_rgb(0x8a, 0x3a, 0x1f),
            Color32::from_rgb(0x2b, 0x10, 0x0a),
        ),
        "gradient-bg-chrome" => (
            Color32::from_rgb(0x9a, 0xa4, 0xaf),
            Color32::from_rgb(0x2e, 0x33, 0x38),
        ),
        "gradient-bg-electric" => (
            Color32::from_rgb(0x27, 0x4b, 0xdb),
            Color32::from_rgb(0x0a, 0x10, 0x33),
        ),
        "gradient-bg-ocean" => (
            Color32::from_rgb(0x0f, 0x5e, 0x68),
            Color32::from_rgb(0x04, 0x1c, 0x22),
        ),
        "gradient-bg-aurora" => (
            Color32::from_rgb(0x17, 0x6b, 0x4d),
            Color32::from_rgb(0x12, 0x0d, 0x2e),
        ),
        "gradient-bg-cosmic" => (
            Color32::from_rgb(0x51, 0x1f, 0x70),
            Color32::from_rgb(0x0e, 0x07, 0x1c),
        ),
        // "gradient-bg" and anything unrecognized.
        _ => (
            Color32::from_rgb(0x3a, 0x30, 0x66),
            Color32::from_rgb(0x10, 0x0b, 0x22),
        ),
    }
}

/// Per-card face color, cycled when the card declares none.
pub fn card_face(index: usize, declared: Option<&str>) -> Color32 {
    if let Some(c) = declared.and_then(snapdeck_protocol::theme::parse_hex) {
        return to_color32(c);
    }
    const FACES: [Color32; 4] = [
        Color32::from_rgb(0xb0, 0x3a, 0x2e),
        Color32::from_rgb(0x1f, 0x4d, 0x8f),
        Color32::from_rgb(0x1e, 0x6e, 0x52),
        Color32::from_rgb(0x8f, 0x6a, 0x1f),
    ];
    FACES[index % FACES.len()]
}
