//! Uniform buffer layouts for the effect shaders.
//!
//! Binding contract (bind group 0):
//!
//! | Effect | Dialect | 0 | 1 | 2 | 3 |
//! |---|---|---|---|---|---|
//! | hue rotate | both | `HueUniforms` | texture | sampler | |
//! | glow | WGSL | `GlowColorUniforms` | `GlowIntensityUniforms` | texture | sampler |
//! | glow | GLSL | `GlowBlockUniforms` | texture | sampler | |

use crate::effects::{EffectKind, GlowParams, HueRotateParams};

use super::shaders::ShaderDialect;

/// Hue offset, padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HueUniforms {
    pub offset: f32,
    pub _padding: [f32; 3],
}

impl From<&HueRotateParams> for HueUniforms {
    fn from(params: &HueRotateParams) -> Self {
        Self {
            offset: params.offset,
            _padding: [0.0; 3],
        }
    }
}

/// WGSL glow colour (`vec4<f32>`, alpha unused).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlowColorUniforms {
    pub color: [f32; 4],
}

/// WGSL glow intensity, padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlowIntensityUniforms {
    pub intensity: f32,
    pub _padding: [f32; 3],
}

/// GLSL std140 block `{ vec3 color; float intensity; }`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlowBlockUniforms {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl From<&GlowParams> for GlowColorUniforms {
    fn from(params: &GlowParams) -> Self {
        let [r, g, b] = params.color;
        Self {
            color: [r, g, b, 1.0],
        }
    }
}

impl From<&GlowParams> for GlowIntensityUniforms {
    fn from(params: &GlowParams) -> Self {
        Self {
            intensity: params.intensity,
            _padding: [0.0; 3],
        }
    }
}

impl From<&GlowParams> for GlowBlockUniforms {
    fn from(params: &GlowParams) -> Self {
        Self {
            color: params.color,
            intensity: params.intensity,
        }
    }
}

/// Binding slot of the source texture for an effect in a dialect.
/// The sampler always follows at the next slot.
pub fn texture_binding(kind: EffectKind, dialect: ShaderDialect) -> u32 {
    match (kind, dialect) {
        (EffectKind::Glow, ShaderDialect::Wgsl) => 2,
        _ => 1,
    }
}
