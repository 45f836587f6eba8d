use crate::error::{RenderError, RenderResult};
use image::Rgba;

/// Word colors drawn on light backgrounds.
const DARK_PALETTE: [[u8; 3]; 8] = [
    [0x1f, 0x3b, 0x73],
    [0x8c, 0x1c, 0x13],
    [0x1b, 0x5e, 0x20],
    [0x4a, 0x14, 0x8c],
    [0xb2, 0x4a, 0x00],
    [0x00, 0x5f, 0x73],
    [0x6d, 0x4c, 0x41],
    [0x33, 0x33, 0x33],
];

/// Word colors drawn on dark backgrounds.
const LIGHT_PALETTE: [[u8; 3]; 8] = [
    [0xff, 0xd1, 0x66],
    [0x06, 0xd6, 0xa0],
    [0x8e, 0xca, 0xe6],
    [0xff, 0x8f, 0xab],
    [0xe9, 0xed, 0xc9],
    [0xb8, 0xc0, 0xff],
    [0xff, 0xb7, 0x03],
    [0xf1, 0xfa, 0xee],
];

/// Parse a color name or `#rrggbb` / `#rrggbbaa` hex string.
pub fn parse_color(value: &str) -> RenderResult<Rgba<u8>> {
    let value = value.trim();
    let named = match value.to_ascii_lowercase().as_str() {
        "white" => Some([255, 255, 255, 255]),
        "black" => Some([0, 0, 0, 255]),
        "gray" | "grey" => Some([128, 128, 128, 255]),
        "red" => Some([255, 0, 0, 255]),
        "green" => Some([0, 128, 0, 255]),
        "blue" => Some([0, 0, 255, 255]),
        "navy" => Some([0, 0, 128, 255]),
        "transparent" => Some([0, 0, 0, 0]),
        _ => None,
    };
    if let Some(rgba) = named {
        return Ok(Rgba(rgba));
    }

    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| RenderError::InvalidOptions(format!("unknown color '{}'", value)))?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RenderError::InvalidOptions(format!(
            "color '{}' must be #rrggbb or #rrggbbaa",
            value
        )));
    }

    let channel = |start: usize| {
        u8::from_str_radix(&hex[start..start + 2], 16)
            .map_err(|e| RenderError::InvalidOptions(format!("color '{}': {}", value, e)))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

/// Palette readable against `background`.
pub fn palette_for(background: Rgba<u8>) -> Vec<Rgba<u8>> {
    let [r, g, b, a] = background.0;
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    // a transparent canvas is usually shown on white
    let palette = if a < 128 || luminance >= 128.0 {
        &DARK_PALETTE
    } else {
        &LIGHT_PALETTE
    };
    palette.iter().map(|[r, g, b]| Rgba([*r, *g, *b, 255])).collect()
}
