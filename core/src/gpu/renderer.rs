//! Headless effect renderer.

use std::collections::HashMap;

use image::RgbaImage;

use super::{
    context::{GpuContext, GpuError},
    effect_pipeline::EffectPipeline,
    shaders::ShaderDialect,
    textures::{ReadbackBuffer, RenderTarget, SourceTexture},
};
use crate::effects::{Effect, EffectKind};

/// Headless renderer that runs the effect shaders over whole images.
///
/// Builds a pipeline for every effect in every dialect this build supports.
pub struct EffectRenderer {
    ctx: GpuContext,
    pipelines: HashMap<(EffectKind, ShaderDialect), EffectPipeline>,
}

impl EffectRenderer {
    /// Create a renderer with a fresh GPU context.
    pub async fn new() -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        Self::with_context(ctx)
    }

    /// Create a renderer on an existing GPU context.
    pub fn with_context(ctx: GpuContext) -> Result<Self, GpuError> {
        let mut pipelines = HashMap::new();
        for dialect in ShaderDialect::all() {
            if !dialect.is_available() {
                log::warn!("Shader dialect {} not enabled, skipping", dialect);
                continue;
            }
            for kind in EffectKind::all() {
                let pipeline = EffectPipeline::new(&ctx.device, *kind, *dialect)?;
                pipelines.insert((*kind, *dialect), pipeline);
            }
        }

        Ok(Self { ctx, pipelines })
    }

    /// Whether pipelines for `dialect` were built.
    pub fn supports(&self, dialect: ShaderDialect) -> bool {
        EffectKind::all()
            .iter()
            .all(|kind| self.pipelines.contains_key(&(*kind, dialect)))
    }

    /// Largest image width or height `render` accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.ctx.max_texture_dimension()
    }

    /// Run `effect` over `image` with the shaders of `dialect`.
    ///
    /// Returns an image of the same size, one shader invocation per pixel.
    /// Images larger than [`Self::max_texture_dimension`] on either axis
    /// yield [`GpuError::InvalidSize`].
    pub fn render(
        &self,
        image: &RgbaImage,
        effect: &Effect,
        dialect: ShaderDialect,
    ) -> Result<RgbaImage, GpuError> {
        let pipeline = self
            .pipelines
            .get(&(effect.kind(), dialect))
            .ok_or(GpuError::DialectUnavailable(dialect))?;

        let device = &self.ctx.device;
        let queue = &self.ctx.queue;
        let (width, height) = image.dimensions();

        let source = SourceTexture::from_image(device, queue, "effect_source", image)?;
        let target = RenderTarget::for_output(device, "effect_target", width, height)?;
        let readback = ReadbackBuffer::new(device, width, height);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("effect_encoder"),
        });
        pipeline.apply(device, &mut encoder, effect, source.view(), target.view())?;
        readback.copy_from(&mut encoder, &target);
        queue.submit(std::iter::once(encoder.finish()));

        log::debug!(
            "Rendered {} over {}x{} ({})",
            effect.kind().name(),
            width,
            height,
            dialect
        );

        readback.read_image(device)
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{GlowParams, HueRotateParams};
    use image::Rgba;

    #[tokio::test]
    async fn test_renderer_creation() {
        let result = EffectRenderer::new().await;
        if let Ok(renderer) = result {
            assert!(renderer.supports(ShaderDialect::Wgsl));
            let info = renderer.adapter_info();
            assert!(!info.name.is_empty());
        }
    }

    #[tokio::test]
    async fn test_render_red_to_green() {
        let renderer = match EffectRenderer::new().await {
            Ok(renderer) => renderer,
            Err(_) => return,
        };

        let image = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let effect = Effect::HueRotate(HueRotateParams { offset: 1.0 / 3.0 });
        let out = renderer
            .render(&image, &effect, ShaderDialect::Wgsl)
            .unwrap();

        assert_eq!(out.dimensions(), (8, 8));
        for pixel in out.pixels() {
            assert!(pixel.0[0] <= 1);
            assert!(pixel.0[1] >= 254);
            assert!(pixel.0[2] <= 1);
            assert_eq!(pixel.0[3], 255);
        }
    }

    #[tokio::test]
    async fn test_render_opaque_glow_passthrough() {
        let renderer = match EffectRenderer::new().await {
            Ok(renderer) => renderer,
            Err(_) => return,
        };

        let image = RgbaImage::from_pixel(12, 5, Rgba([10, 20, 30, 255]));
        let effect = Effect::Glow(GlowParams::default());
        let out = renderer
            .render(&image, &effect, ShaderDialect::Wgsl)
            .unwrap();
        assert_eq!(out, image);
    }

    #[tokio::test]
    async fn test_render_rejects_image_over_texture_limit() {
        let renderer = match EffectRenderer::new().await {
            Ok(renderer) => renderer,
            Err(_) => return,
        };

        let width = renderer.max_texture_dimension() + 1;
        let image = RgbaImage::from_pixel(width, 1, Rgba([255, 0, 0, 255]));
        let effect = Effect::HueRotate(HueRotateParams { offset: 0.25 });
        let result = renderer.render(&image, &effect, ShaderDialect::Wgsl);

        match result {
            Err(GpuError::InvalidSize { width: w, height: 1 }) => assert_eq!(w, width),
            other => panic!("expected InvalidSize, got {:?}", other.map(|i| i.dimensions())),
        }
    }
}
