//! Sprite FX Core
//!
//! Hue-rotate and soft alpha glow effects for 2D sprites.
//!
//! # Features
//!
//! - Effect shaders in WGSL and GLSL 450 with a fixed binding contract
//! - Headless GPU rendering via wgpu (Metal on macOS, Vulkan/GL elsewhere)
//! - CPU reference implementation of both effects, parallel over rows
//! - Image loading with a baked-in hue offset (`<image>/<degrees>.hue_offset`)
//! - JSON-configurable processing pipeline

pub mod color;
pub mod effects;
pub mod gpu;
pub mod loader;
pub mod pipeline;
pub mod synth;

// Re-export commonly used types
pub use color::{hsv_to_rgb, parse_hex_color, rgb_to_hsv, rotate_hue};
pub use effects::{Effect, EffectKind, GlowParams, HueRotateParams, TexelSource};
pub use gpu::{EffectRenderer, GpuContext, GpuError, ShaderDialect};
pub use loader::{load_image_with_hue, LoaderError};
pub use pipeline::{process_file, process_image, Backend, PipelineError, ProcessConfig};
