//! Embedded effect shaders in both supported dialects.
//!
//! Each effect ships as WGSL and as GLSL 450. Both variants implement the
//! same math as [`crate::effects`]; they differ only in how the glow
//! uniforms are bound (see [`crate::gpu::uniforms`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wgpu::{Device, ShaderModule};

use super::context::GpuError;
use crate::effects::EffectKind;

pub const FULLSCREEN_WGSL: &str = include_str!("shaders/fullscreen.wgsl");
pub const HUE_WGSL: &str = include_str!("shaders/hue.wgsl");
pub const GLOW_WGSL: &str = include_str!("shaders/glow.wgsl");

pub const FULLSCREEN_GLSL: &str = include_str!("shaders/fullscreen.vert");
pub const HUE_GLSL: &str = include_str!("shaders/hue.frag");
pub const GLOW_GLSL: &str = include_str!("shaders/glow.frag");

/// Shading language an effect pipeline is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderDialect {
    /// WebGPU Shading Language
    #[default]
    Wgsl,
    /// OpenGL Shading Language 450, compiled through naga's GLSL frontend
    Glsl,
}

impl ShaderDialect {
    pub fn all() -> &'static [ShaderDialect] {
        &[ShaderDialect::Wgsl, ShaderDialect::Glsl]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShaderDialect::Wgsl => "wgsl",
            ShaderDialect::Glsl => "glsl",
        }
    }

    /// Whether this build can compile the dialect.
    pub fn is_available(&self) -> bool {
        match self {
            ShaderDialect::Wgsl => true,
            ShaderDialect::Glsl => cfg!(feature = "glsl"),
        }
    }

    /// Vertex and fragment entry point names.
    pub fn entry_points(&self) -> (&'static str, &'static str) {
        match self {
            ShaderDialect::Wgsl => ("vs_main", "fs_main"),
            ShaderDialect::Glsl => ("main", "main"),
        }
    }

    /// Source of the fullscreen-triangle vertex shader.
    pub fn vertex_source(&self) -> &'static str {
        match self {
            ShaderDialect::Wgsl => FULLSCREEN_WGSL,
            ShaderDialect::Glsl => FULLSCREEN_GLSL,
        }
    }

    /// Source of the fragment shader for an effect.
    pub fn fragment_source(&self, kind: EffectKind) -> &'static str {
        match (self, kind) {
            (ShaderDialect::Wgsl, EffectKind::HueRotate) => HUE_WGSL,
            (ShaderDialect::Wgsl, EffectKind::Glow) => GLOW_WGSL,
            (ShaderDialect::Glsl, EffectKind::HueRotate) => HUE_GLSL,
            (ShaderDialect::Glsl, EffectKind::Glow) => GLOW_GLSL,
        }
    }
}

impl fmt::Display for ShaderDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wgsl" => Ok(ShaderDialect::Wgsl),
            "glsl" => Ok(ShaderDialect::Glsl),
            _ => Err(format!(
                "Unknown shader dialect: '{}'. Expected wgsl or glsl",
                s
            )),
        }
    }
}

#[derive(Clone, Copy)]
enum Stage {
    Vertex,
    Fragment,
}

fn create_module(
    device: &Device,
    label: &str,
    dialect: ShaderDialect,
    stage: Stage,
    source: &'static str,
) -> Result<ShaderModule, GpuError> {
    match dialect {
        ShaderDialect::Wgsl => Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })),
        #[cfg(feature = "glsl")]
        ShaderDialect::Glsl => {
            let stage = match stage {
                Stage::Vertex => wgpu::naga::ShaderStage::Vertex,
                Stage::Fragment => wgpu::naga::ShaderStage::Fragment,
            };
            Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Glsl {
                    shader: source.into(),
                    stage,
                    defines: &[],
                },
            }))
        }
        #[cfg(not(feature = "glsl"))]
        ShaderDialect::Glsl => {
            let _ = (label, stage, source);
            Err(GpuError::DialectUnavailable(dialect))
        }
    }
}

/// Create the fullscreen-triangle vertex module for a dialect.
pub fn create_vertex_module(
    device: &Device,
    dialect: ShaderDialect,
) -> Result<ShaderModule, GpuError> {
    let label = format!("fullscreen_vertex_{}", dialect);
    create_module(
        device,
        &label,
        dialect,
        Stage::Vertex,
        dialect.vertex_source(),
    )
}

/// Create the fragment module implementing `kind` in a dialect.
pub fn create_fragment_module(
    device: &Device,
    kind: EffectKind,
    dialect: ShaderDialect,
) -> Result<ShaderModule, GpuError> {
    let label = format!("{}_fragment_{}", kind.name(), dialect);
    create_module(
        device,
        &label,
        dialect,
        Stage::Fragment,
        dialect.fragment_source(kind),
    )
}
