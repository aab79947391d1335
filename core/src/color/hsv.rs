//! Branchless RGB <-> HSV conversion.
//!
//! Mirrors the select-and-blend formulation used by the hue shaders so the
//! CPU reference and the GPU output agree to within rounding.

use super::wrap_unit;

/// Guards both divisions in [`rgb_to_hsv`] against grey and black inputs.
pub const HSV_EPSILON: f32 = 1.0e-10;

#[inline]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

#[inline]
fn mix4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Convert RGB to HSV. All components are in `[0, 1]`; hue is a fraction of a turn.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let k = [0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0];

    let p = mix4([b, g, k[3], k[2]], [g, b, k[0], k[1]], step(b, g));
    let q = mix4([p[0], p[1], p[3], r], [r, p[1], p[2], p[0]], step(p[0], r));

    let d = q[0] - q[3].min(q[1]);
    let hue = (q[2] + (q[3] - q[1]) / (6.0 * d + HSV_EPSILON)).abs();
    let saturation = d / (q[0] + HSV_EPSILON);
    [hue, saturation, q[0]]
}

/// Convert HSV back to RGB. Hue may be any real number; it is wrapped per channel.
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [hue, saturation, value] = hsv;
    let phases = [1.0, 2.0 / 3.0, 1.0 / 3.0];

    phases.map(|phase| {
        let shifted = hue + phase;
        let triangle = ((shifted - shifted.floor()) * 6.0 - 3.0).abs();
        let channel = (triangle - 1.0).clamp(0.0, 1.0);
        value * (1.0 + (channel - 1.0) * saturation)
    })
}

/// Rotate the hue of an RGBA texel by `offset` turns, preserving alpha.
///
/// The new hue is `(hue + offset) mod 1.0` with floored modulo, so negative
/// offsets rotate backwards and any integer offset is a no-op.
pub fn rotate_hue(texel: [f32; 4], offset: f32) -> [f32; 4] {
    let [hue, saturation, value] = rgb_to_hsv([texel[0], texel[1], texel[2]]);
    let [r, g, b] = hsv_to_rgb([wrap_unit(hue + offset), saturation, value]);
    [r, g, b, texel[3]]
}
