//! Soft alpha glow effect.
//!
//! Pixels that are not fully opaque pick up a glow whose strength is the
//! 9x9 box-blurred alpha of their neighbourhood. The glow colour is
//! composited under the pixel with the source-over formula:
//!
//! ```text
//! out.a   = a + glow_a * (1 - a)
//! out.rgb = rgb * a + glow_color * glow_a * (1 - a)
//! ```
//!
//! The rgb term is premultiplied while alpha is straight; shaders and this
//! reference produce exactly that, and callers should not un-premultiply it.

use serde::{Deserialize, Serialize};

use super::TexelSource;

/// Half width of the square blur kernel (9x9 texels).
pub const GLOW_KERNEL_RADIUS: i32 = 4;

const GLOW_KERNEL_WIDTH: f32 = (2 * GLOW_KERNEL_RADIUS + 1) as f32;

/// Uniform parameters for the glow effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowParams {
    /// Glow colour, linear RGB in `[0, 1]`.
    pub color: [f32; 3],
    /// Scales the blurred alpha into the composite weight.
    pub intensity: f32,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Average alpha of the 9x9 neighbourhood centred on `(x, y)`.
///
/// Each of the nine rows is averaged on its own and the row means are
/// averaged again, the same summation order as the shaders.
pub fn neighborhood_alpha<S: TexelSource + ?Sized>(source: &S, x: i32, y: i32) -> f32 {
    let mut sum = 0.0;
    for dy in -GLOW_KERNEL_RADIUS..=GLOW_KERNEL_RADIUS {
        let mut row = 0.0;
        for dx in -GLOW_KERNEL_RADIUS..=GLOW_KERNEL_RADIUS {
            row += source.fetch(x + dx, y + dy)[3];
        }
        sum += row / GLOW_KERNEL_WIDTH;
    }
    sum / GLOW_KERNEL_WIDTH
}

/// Evaluate the glow effect for the texel at `(x, y)`.
pub fn glow_texel<S: TexelSource + ?Sized>(
    source: &S,
    x: i32,
    y: i32,
    params: &GlowParams,
) -> [f32; 4] {
    let texel = source.fetch(x, y);
    let alpha = texel[3];
    if alpha >= 1.0 {
        return texel;
    }

    let glow_alpha = neighborhood_alpha(source, x, y) * params.intensity;
    let under = glow_alpha * (1.0 - alpha);

    [
        texel[0] * alpha + params.color[0] * under,
        texel[1] * alpha + params.color[1] * under,
        texel[2] * alpha + params.color[2] * under,
        alpha + under,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uniform-alpha source with one distinct centre texel.
    struct Field {
        center: [f32; 4],
        surround_alpha: f32,
    }

    impl TexelSource for Field {
        fn dimensions(&self) -> (u32, u32) {
            (64, 64)
        }

        fn fetch(&self, x: i32, y: i32) -> [f32; 4] {
            if x == 32 && y == 32 {
                self.center
            } else {
                [0.0, 0.0, 0.0, self.surround_alpha]
            }
        }
    }

    #[test]
    fn test_opaque_passes_through() {
        let field = Field {
            center: [0.3, 0.6, 0.9, 1.0],
            surround_alpha: 0.0,
        };
        let out = glow_texel(&field, 32, 32, &GlowParams::default());
        assert_eq!(out, [0.3, 0.6, 0.9, 1.0]);
    }

    #[test]
    fn test_uniform_neighbourhood_average() {
        let field = Field {
            center: [0.0, 0.0, 0.0, 0.5],
            surround_alpha: 0.5,
        };
        assert!((neighborhood_alpha(&field, 32, 32) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_composite_formula() {
        let field = Field {
            center: [0.2, 0.4, 0.6, 0.5],
            surround_alpha: 0.5,
        };
        let params = GlowParams {
            color: [1.0, 0.0, 0.0],
            intensity: 0.8,
        };
        let out = glow_texel(&field, 32, 32, &params);

        let glow_alpha = 0.5 * 0.8;
        let under = glow_alpha * 0.5;
        assert!((out[0] - (0.2 * 0.5 + under)).abs() < 1e-6);
        assert!((out[1] - 0.4 * 0.5).abs() < 1e-6);
        assert!((out[2] - 0.6 * 0.5).abs() < 1e-6);
        assert!((out[3] - (0.5 + under)).abs() < 1e-6);
    }

    #[test]
    fn test_transparent_neighbourhood_stays_transparent() {
        let field = Field {
            center: [0.0, 0.0, 0.0, 0.0],
            surround_alpha: 0.0,
        };
        let params = GlowParams {
            color: [1.0, 1.0, 0.0],
            intensity: 1.0,
        };
        assert_eq!(glow_texel(&field, 32, 32, &params), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_kernel_only_reaches_four_texels() {
        struct Spot;
        impl TexelSource for Spot {
            fn dimensions(&self) -> (u32, u32) {
                (32, 32)
            }
            fn fetch(&self, x: i32, y: i32) -> [f32; 4] {
                let alpha = if x == 20 && y == 10 { 1.0 } else { 0.0 };
                [0.0, 0.0, 0.0, alpha]
            }
        }

        assert!((neighborhood_alpha(&Spot, 16, 10) - 1.0 / 81.0).abs() < 1e-6);
        assert_eq!(neighborhood_alpha(&Spot, 15, 10), 0.0);
        assert!((neighborhood_alpha(&Spot, 20, 14) - 1.0 / 81.0).abs() < 1e-6);
        assert_eq!(neighborhood_alpha(&Spot, 20, 15), 0.0);
    }
}
