//! CPU reference implementation of the sprite effects.
//!
//! Each effect is a pure per-pixel transform. The GPU shaders in
//! [`crate::gpu`] implement the same math; these functions are the source
//! of truth for tests and for hosts without a usable adapter.

pub mod glow;
pub mod hue;

use image::{Rgba, Rgba32FImage, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::{texel_from_rgba8, texel_to_rgba8};

pub use glow::{glow_texel, neighborhood_alpha, GlowParams, GLOW_KERNEL_RADIUS};
pub use hue::{hue_rotate_texel, HueRotateParams};

/// Integer texel fetch with clamp-to-edge addressing.
///
/// Coordinates outside the image resolve to the nearest edge texel, the
/// same behaviour as a `ClampToEdge` sampler or a clamped `textureLoad`.
pub trait TexelSource {
    /// Width and height in texels.
    fn dimensions(&self) -> (u32, u32);

    /// Fetch the normalised RGBA texel at `(x, y)`, clamped to the image bounds.
    fn fetch(&self, x: i32, y: i32) -> [f32; 4];
}

#[inline]
fn clamp_coord(value: i32, size: u32) -> u32 {
    value.clamp(0, size.saturating_sub(1) as i32) as u32
}

impl TexelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn fetch(&self, x: i32, y: i32) -> [f32; 4] {
        let (width, height) = RgbaImage::dimensions(self);
        texel_from_rgba8(self.get_pixel(clamp_coord(x, width), clamp_coord(y, height)).0)
    }
}

impl TexelSource for Rgba32FImage {
    fn dimensions(&self) -> (u32, u32) {
        Rgba32FImage::dimensions(self)
    }

    fn fetch(&self, x: i32, y: i32) -> [f32; 4] {
        let (width, height) = Rgba32FImage::dimensions(self);
        self.get_pixel(clamp_coord(x, width), clamp_coord(y, height)).0
    }
}

/// Which effect to run. Used to select shaders and pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    HueRotate,
    Glow,
}

impl EffectKind {
    pub fn all() -> &'static [EffectKind] {
        &[EffectKind::HueRotate, EffectKind::Glow]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::HueRotate => "hue_rotate",
            EffectKind::Glow => "glow",
        }
    }
}

/// An effect together with its uniform parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    HueRotate(HueRotateParams),
    Glow(GlowParams),
}

impl Default for Effect {
    fn default() -> Self {
        Self::HueRotate(HueRotateParams::default())
    }
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::HueRotate(_) => EffectKind::HueRotate,
            Effect::Glow(_) => EffectKind::Glow,
        }
    }

    /// Evaluate the effect for the texel at `(x, y)` of `source`.
    pub fn evaluate<S: TexelSource + ?Sized>(&self, source: &S, x: i32, y: i32) -> [f32; 4] {
        match self {
            Effect::HueRotate(params) => hue_rotate_texel(source.fetch(x, y), params),
            Effect::Glow(params) => glow_texel(source, x, y, params),
        }
    }

    /// Apply the effect to every pixel of an 8-bit image.
    pub fn apply_cpu(&self, source: &RgbaImage) -> RgbaImage {
        let (width, height) = source.dimensions();
        let mut output = RgbaImage::new(width, height);
        let row_len = width as usize * 4;
        if row_len == 0 {
            return output;
        }

        output
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                    let texel = self.evaluate(source, x as i32, y as i32);
                    pixel.copy_from_slice(&texel_to_rgba8(texel));
                }
            });

        output
    }

    /// Apply the effect to every pixel of a float image, without quantisation.
    pub fn apply_cpu_f32(&self, source: &Rgba32FImage) -> Rgba32FImage {
        let (width, height) = source.dimensions();
        let mut output = Rgba32FImage::new(width, height);
        let row_len = width as usize * 4;
        if row_len == 0 {
            return output;
        }

        output
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                    pixel.copy_from_slice(&self.evaluate(source, x as i32, y as i32));
                }
            });

        output
    }
}

/// Convert an 8-bit image to normalised floats.
pub fn to_f32_image(image: &RgbaImage) -> Rgba32FImage {
    let (width, height) = image.dimensions();
    Rgba32FImage::from_fn(width, height, |x, y| {
        Rgba(texel_from_rgba8(image.get_pixel(x, y).0))
    })
}
