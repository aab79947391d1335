//! Render pipelines for the sprite effects.
//!
//! One [`EffectPipeline`] owns the render pipeline, bind group layout and
//! sampler for a single effect in a single dialect. Applying it records one
//! fullscreen-triangle pass that reads the source texture and writes one
//! RGBA colour per output pixel.

use wgpu::util::DeviceExt;
use wgpu::{BindGroupLayout, Buffer, Device, RenderPipeline, Sampler, TextureView};

use super::context::GpuError;
use super::layouts::effect_layout_builder;
use super::pipelines::{create_effect_pipeline_layout, FullscreenPipelineBuilder};
use super::shaders::{create_fragment_module, create_vertex_module, ShaderDialect};
use super::textures::create_effect_sampler;
use super::uniforms::{
    texture_binding, GlowBlockUniforms, GlowColorUniforms, GlowIntensityUniforms, HueUniforms,
};
use crate::effects::{Effect, EffectKind};

/// Render pipeline for one effect in one shader dialect.
pub struct EffectPipeline {
    kind: EffectKind,
    dialect: ShaderDialect,
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    uniform_bindings: u32,
    sampler: Sampler,
}

impl EffectPipeline {
    /// Create a new effect pipeline.
    pub fn new(
        device: &Device,
        kind: EffectKind,
        dialect: ShaderDialect,
    ) -> Result<Self, GpuError> {
        let vertex_shader = create_vertex_module(device, dialect)?;
        let fragment_shader = create_fragment_module(device, kind, dialect)?;

        let bind_group_layout = effect_layout_builder(kind, dialect).build(device);
        let pipeline_layout =
            create_effect_pipeline_layout(device, "effect_pipeline_layout", &bind_group_layout);

        let label = match kind {
            EffectKind::HueRotate => "hue_rotate_pipeline",
            EffectKind::Glow => "glow_pipeline",
        };
        let pipeline = FullscreenPipelineBuilder::new(label)
            .layout(&pipeline_layout)
            .shaders(dialect, &vertex_shader, &fragment_shader)
            .build(device)
            .ok_or(GpuError::MissingShader(label))?;

        let uniform_bindings = texture_binding(kind, dialect);

        log::debug!("Created {} pipeline ({})", kind.name(), dialect);

        Ok(Self {
            kind,
            dialect,
            pipeline,
            bind_group_layout,
            uniform_bindings,
            sampler: create_effect_sampler(device),
        })
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn dialect(&self) -> ShaderDialect {
        self.dialect
    }

    /// Number of bindings in the pipeline's bind group.
    pub fn binding_count(&self) -> usize {
        self.uniform_bindings as usize + 2
    }

    fn uniform_buffer(device: &Device, contents: &[u8]) -> Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("effect_uniforms"),
            contents,
            usage: wgpu::BufferUsages::UNIFORM,
        })
    }

    /// Uniform buffers holding `effect`'s parameters, in binding order.
    fn create_uniform_buffers(&self, device: &Device, effect: &Effect) -> Vec<Buffer> {
        match (effect, self.dialect) {
            (Effect::HueRotate(params), _) => {
                let uniforms = HueUniforms::from(params);
                vec![Self::uniform_buffer(device, bytemuck::bytes_of(&uniforms))]
            }
            (Effect::Glow(params), ShaderDialect::Wgsl) => {
                let color = GlowColorUniforms::from(params);
                let intensity = GlowIntensityUniforms::from(params);
                vec![
                    Self::uniform_buffer(device, bytemuck::bytes_of(&color)),
                    Self::uniform_buffer(device, bytemuck::bytes_of(&intensity)),
                ]
            }
            (Effect::Glow(params), ShaderDialect::Glsl) => {
                let block = GlowBlockUniforms::from(params);
                vec![Self::uniform_buffer(device, bytemuck::bytes_of(&block))]
            }
        }
    }

    /// Record the effect pass from `source_view` into `output_view`.
    ///
    /// Parameters go into buffers owned by this pass, so several passes
    /// with different parameters may share one encoder.
    pub fn apply(
        &self,
        device: &Device,
        encoder: &mut wgpu::CommandEncoder,
        effect: &Effect,
        source_view: &TextureView,
        output_view: &TextureView,
    ) -> Result<(), GpuError> {
        if effect.kind() != self.kind {
            return Err(GpuError::EffectMismatch {
                expected: self.kind,
                actual: effect.kind(),
            });
        }
        let uniform_buffers = self.create_uniform_buffers(device, effect);

        let texture = self.uniform_bindings;
        let mut entries: Vec<wgpu::BindGroupEntry> = uniform_buffers
            .iter()
            .enumerate()
            .map(|(binding, buffer)| wgpu::BindGroupEntry {
                binding: binding as u32,
                resource: buffer.as_entire_binding(),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: texture,
            resource: wgpu::BindingResource::TextureView(source_view),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: texture + 1,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("effect_bind_group"),
            layout: &self.bind_group_layout,
            entries: &entries,
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("effect_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::HueRotateParams;
    use crate::gpu::textures::{ReadbackBuffer, RenderTarget, SourceTexture};
    use crate::gpu::GpuContext;
    use image::{Rgba, RgbaImage};

    #[tokio::test]
    async fn test_effect_pipeline_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => {
                eprintln!("Skipping test - GPU not available");
                return;
            }
        };

        for dialect in ShaderDialect::all() {
            if !dialect.is_available() {
                continue;
            }
            let hue = EffectPipeline::new(&ctx.device, EffectKind::HueRotate, *dialect).unwrap();
            assert_eq!(hue.binding_count(), 3);

            let glow = EffectPipeline::new(&ctx.device, EffectKind::Glow, *dialect).unwrap();
            let expected = match dialect {
                ShaderDialect::Wgsl => 4,
                ShaderDialect::Glsl => 3,
            };
            assert_eq!(glow.binding_count(), expected);
        }
    }

    #[tokio::test]
    async fn test_passes_sharing_encoder_keep_their_parameters() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };
        let device = &ctx.device;

        let pipeline =
            EffectPipeline::new(device, EffectKind::HueRotate, ShaderDialect::Wgsl).unwrap();
        let red = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let source = SourceTexture::from_image(device, &ctx.queue, "red", &red).unwrap();
        let first = RenderTarget::for_output(device, "first", 4, 4).unwrap();
        let second = RenderTarget::for_output(device, "second", 4, 4).unwrap();
        let first_readback = ReadbackBuffer::new(device, 4, 4);
        let second_readback = ReadbackBuffer::new(device, 4, 4);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("two_passes"),
        });
        let to_green = Effect::HueRotate(HueRotateParams { offset: 1.0 / 3.0 });
        let to_blue = Effect::HueRotate(HueRotateParams { offset: 2.0 / 3.0 });
        pipeline
            .apply(device, &mut encoder, &to_green, source.view(), first.view())
            .unwrap();
        pipeline
            .apply(device, &mut encoder, &to_blue, source.view(), second.view())
            .unwrap();
        first_readback.copy_from(&mut encoder, &first);
        second_readback.copy_from(&mut encoder, &second);
        ctx.queue.submit(std::iter::once(encoder.finish()));

        let green = first_readback.read_image(device).unwrap();
        let blue = second_readback.read_image(device).unwrap();
        for pixel in green.pixels() {
            assert!(pixel.0[0] <= 1 && pixel.0[1] >= 254 && pixel.0[2] <= 1, "{:?}", pixel);
        }
        for pixel in blue.pixels() {
            assert!(pixel.0[0] <= 1 && pixel.0[1] <= 1 && pixel.0[2] >= 254, "{:?}", pixel);
        }
    }

    #[tokio::test]
    async fn test_apply_rejects_other_effect() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };
        let device = &ctx.device;

        let pipeline =
            EffectPipeline::new(device, EffectKind::HueRotate, ShaderDialect::Wgsl).unwrap();
        let image = RgbaImage::new(2, 2);
        let source = SourceTexture::from_image(device, &ctx.queue, "src", &image).unwrap();
        let target = RenderTarget::for_output(device, "dst", 2, 2).unwrap();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("mismatch"),
        });

        let glow = Effect::Glow(crate::effects::GlowParams::default());
        let result = pipeline.apply(device, &mut encoder, &glow, source.view(), target.view());
        assert!(matches!(
            result,
            Err(GpuError::EffectMismatch {
                expected: EffectKind::HueRotate,
                actual: EffectKind::Glow,
            })
        ));
    }
}
