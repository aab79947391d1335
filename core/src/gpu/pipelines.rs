//! Render pipeline builders for the fullscreen effect passes.
//!
//! Every effect draws one fullscreen triangle with no vertex buffers. The
//! vertex and fragment stages come from separate modules because the GLSL
//! dialect compiles each stage on its own.

use wgpu::{
    BindGroupLayout, ColorTargetState, Device, PipelineLayout, RenderPipeline, ShaderModule,
};

use super::shaders::ShaderDialect;
use super::textures::EFFECT_TEXTURE_FORMAT;

/// Builder for fullscreen-triangle effect pipelines.
pub struct FullscreenPipelineBuilder<'a> {
    label: &'static str,
    layout: Option<&'a PipelineLayout>,
    vertex_shader: Option<&'a ShaderModule>,
    fragment_shader: Option<&'a ShaderModule>,
    dialect: ShaderDialect,
}

impl<'a> FullscreenPipelineBuilder<'a> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            layout: None,
            vertex_shader: None,
            fragment_shader: None,
            dialect: ShaderDialect::default(),
        }
    }

    /// Set the pipeline layout.
    pub fn layout(mut self, layout: &'a PipelineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the vertex and fragment modules, compiled from `dialect`.
    ///
    /// The dialect decides the entry point names.
    pub fn shaders(
        mut self,
        dialect: ShaderDialect,
        vertex: &'a ShaderModule,
        fragment: &'a ShaderModule,
    ) -> Self {
        self.dialect = dialect;
        self.vertex_shader = Some(vertex);
        self.fragment_shader = Some(fragment);
        self
    }

    /// Build the render pipeline.
    ///
    /// Returns `None` until both shader stages are set. The colour target
    /// replaces its contents; effects never blend with the previous output.
    pub fn build(self, device: &Device) -> Option<RenderPipeline> {
        let vertex_shader = self.vertex_shader?;
        let fragment_shader = self.fragment_shader?;
        let (vertex_entry, fragment_entry) = self.dialect.entry_points();

        Some(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: self.layout,
            vertex: wgpu::VertexState {
                module: vertex_shader,
                entry_point: Some(vertex_entry),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment_shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(ColorTargetState {
                    format: EFFECT_TEXTURE_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        }))
    }
}

/// Create a pipeline layout over a single effect bind group.
pub fn create_effect_pipeline_layout(
    device: &Device,
    label: &'static str,
    bind_group_layout: &BindGroupLayout,
) -> PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[tokio::test]
    async fn test_build_requires_shaders() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("empty"),
                entries: &[],
            });
        let pipeline_layout = create_effect_pipeline_layout(&ctx.device, "empty_layout", &layout);

        let pipeline = FullscreenPipelineBuilder::new("empty")
            .layout(&pipeline_layout)
            .build(&ctx.device);
        assert!(pipeline.is_none());
    }
}
