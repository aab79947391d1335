//! Bind group layout builders for the effect pipelines.
//!
//! Provides reusable helpers for creating wgpu bind group layouts that
//! follow the binding contract in [`crate::gpu::uniforms`].

use wgpu::{BindGroupLayout, BindGroupLayoutEntry, Device, ShaderStages};

use super::shaders::ShaderDialect;
use super::uniforms::texture_binding;
use crate::effects::EffectKind;

/// Builder for creating bind group layouts with common patterns.
pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    /// Create a new bind group layout builder.
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry.
    pub fn uniform(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Add a 2D texture entry.
    pub fn texture_2d(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
        self
    }

    /// Add a filtering sampler entry.
    pub fn sampler(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        self
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the bind group layout.
    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Layout builder for an effect in a dialect, before it is built.
pub fn effect_layout_builder(kind: EffectKind, dialect: ShaderDialect) -> BindGroupLayoutBuilder {
    let builder = match (kind, dialect) {
        (EffectKind::HueRotate, _) => {
            BindGroupLayoutBuilder::new("hue_bind_group_layout").uniform(0, ShaderStages::FRAGMENT)
        }
        (EffectKind::Glow, ShaderDialect::Wgsl) => {
            BindGroupLayoutBuilder::new("glow_bind_group_layout_wgsl")
                .uniform(0, ShaderStages::FRAGMENT)
                .uniform(1, ShaderStages::FRAGMENT)
        }
        (EffectKind::Glow, ShaderDialect::Glsl) => {
            BindGroupLayoutBuilder::new("glow_bind_group_layout_glsl")
                .uniform(0, ShaderStages::FRAGMENT)
        }
    };

    let texture = texture_binding(kind, dialect);
    builder
        .texture_2d(texture, ShaderStages::FRAGMENT)
        .sampler(texture + 1, ShaderStages::FRAGMENT)
}

/// Create hue bind group layout (offset, texture, sampler).
pub fn create_hue_layout(device: &Device) -> BindGroupLayout {
    effect_layout_builder(EffectKind::HueRotate, ShaderDialect::Wgsl).build(device)
}

/// Create glow bind group layout for a dialect (3 or 4 bindings).
pub fn create_glow_layout(device: &Device, dialect: ShaderDialect) -> BindGroupLayout {
    effect_layout_builder(EffectKind::Glow, dialect).build(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[test]
    fn test_binding_counts() {
        assert_eq!(
            effect_layout_builder(EffectKind::HueRotate, ShaderDialect::Wgsl).len(),
            3
        );
        assert_eq!(
            effect_layout_builder(EffectKind::HueRotate, ShaderDialect::Glsl).len(),
            3
        );
        assert_eq!(
            effect_layout_builder(EffectKind::Glow, ShaderDialect::Wgsl).len(),
            4
        );
        assert_eq!(
            effect_layout_builder(EffectKind::Glow, ShaderDialect::Glsl).len(),
            3
        );
    }

    #[tokio::test]
    async fn test_bind_group_layout_builder() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return, // Skip if no GPU
        };

        let layout = BindGroupLayoutBuilder::new("test_layout")
            .uniform(0, ShaderStages::VERTEX)
            .texture_2d(1, ShaderStages::FRAGMENT)
            .sampler(2, ShaderStages::FRAGMENT)
            .build(&ctx.device);

        // Layout should be created without panicking
        drop(layout);
    }

    #[tokio::test]
    async fn test_effect_layouts_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let _hue = create_hue_layout(&ctx.device);
        let _glow_wgsl = create_glow_layout(&ctx.device, ShaderDialect::Wgsl);
        let _glow_glsl = create_glow_layout(&ctx.device, ShaderDialect::Glsl);
    }
}
