//! Hue rotation effect.

use serde::{Deserialize, Serialize};

use crate::color::rotate_hue;

/// Uniform parameters for the hue-rotate effect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HueRotateParams {
    /// Hue offset in turns. Interpreted modulo 1.0, negative values rotate backwards.
    pub offset: f32,
}

impl HueRotateParams {
    /// Build parameters from an offset in degrees.
    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            offset: degrees / 360.0,
        }
    }
}

/// Rotate the hue of a sampled texel, leaving alpha untouched.
#[inline]
pub fn hue_rotate_texel(texel: [f32; 4], params: &HueRotateParams) -> [f32; 4] {
    rotate_hue(texel, params.offset)
}
