//! GPU rendering of the sprite effects using wgpu.
//!
//! Runs the WGSL or GLSL effect shaders headlessly: the source image is
//! uploaded as a texture, a fullscreen triangle invokes the fragment shader
//! once per output pixel, and the result is read back to the CPU.

pub mod context;
pub mod effect_pipeline;
pub mod layouts;
pub mod pipelines;
pub mod renderer;
pub mod shaders;
pub mod textures;
pub mod uniforms;

pub use context::{GpuContext, GpuError};
pub use effect_pipeline::EffectPipeline;
pub use renderer::EffectRenderer;
pub use shaders::ShaderDialect;
