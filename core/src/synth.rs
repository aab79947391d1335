//! Synthetic sprite generation for testing.
//!
//! Generates deterministic test images (solid fills, discs, hue sweeps)
//! for unit tests, integration tests, benches and the demo.

use image::{Rgba, RgbaImage};

use crate::color::{f32_to_unorm8, hsv_to_rgb};

/// Generate an image filled with a single colour.
pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Generate an opaque disc centred in a fully transparent image.
///
/// # Arguments
/// * `radius` - Disc radius in pixels, measured from the image centre
/// * `color` - RGB fill of the disc
pub fn disc(width: u32, height: u32, radius: f32, color: [u8; 3]) -> RgbaImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        if (dx * dx + dy * dy).sqrt() <= radius {
            Rgba([color[0], color[1], color[2], 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Generate a disc whose alpha falls off linearly over `feather` pixels.
///
/// Produces the partially transparent edges the glow effect acts on.
pub fn soft_disc(width: u32, height: u32, radius: f32, feather: f32, color: [u8; 3]) -> RgbaImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let feather = feather.max(f32::EPSILON);

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        let alpha = (1.0 - (distance - radius) / feather).clamp(0.0, 1.0);
        Rgba([color[0], color[1], color[2], f32_to_unorm8(alpha)])
    })
}

/// Generate a fully saturated horizontal hue sweep.
///
/// Hue goes from 0 at the left edge to just under one turn at the right;
/// value falls from 1.0 at the top to 0.5 at the bottom.
pub fn hue_wheel(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let hue = x as f32 / width.max(1) as f32;
        let value = 1.0 - 0.5 * y as f32 / height.max(1) as f32;
        let [r, g, b] = hsv_to_rgb([hue, 1.0, value]);
        Rgba([f32_to_unorm8(r), f32_to_unorm8(g), f32_to_unorm8(b), 255])
    })
}
