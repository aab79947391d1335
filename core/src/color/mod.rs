//! Colour math shared by the CPU reference effects.
//!
//! Texels are `[f32; 4]` RGBA in the normalised `[0, 1]` range, matching
//! what a fragment shader sees after sampling an `Rgba8Unorm` texture.

pub mod hsv;

pub use hsv::{hsv_to_rgb, rgb_to_hsv, rotate_hue};

/// Wrap a value into `[0, 1)` with a floored (mathematical) modulo.
///
/// Negative inputs wrap upwards, so `-0.25` becomes `0.75`. This is GLSL
/// `mod(x, 1.0)` / WGSL `fract(x)`, not Rust's truncating `%`.
pub fn wrap_unit(x: f32) -> f32 {
    let wrapped = x - x.floor();
    // x slightly below zero rounds up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert an 8-bit channel to a normalised float.
#[inline]
pub fn unorm8_to_f32(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Quantise a normalised float channel to 8 bits, clamping out-of-range values.
#[inline]
pub fn f32_to_unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert an 8-bit RGBA pixel to a normalised texel.
pub fn texel_from_rgba8(pixel: [u8; 4]) -> [f32; 4] {
    pixel.map(unorm8_to_f32)
}

/// Quantise a normalised texel to an 8-bit RGBA pixel.
pub fn texel_to_rgba8(texel: [f32; 4]) -> [u8; 4] {
    texel.map(f32_to_unorm8)
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}
