//! End-to-end processing: load an image, apply an effect, save the result.

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::gpu::{EffectRenderer, GpuError, ShaderDialect};
use crate::loader::{load_image_with_hue, LoaderError};

pub use crate::color::parse_hex_color;

/// Where an effect is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// CPU reference implementation.
    #[default]
    Cpu,
    /// wgpu with the shaders of the given dialect.
    Gpu(ShaderDialect),
}

/// Processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub effect: Effect,
    #[serde(default)]
    pub backend: Backend,
    /// Evaluate on the CPU when the GPU backend cannot run the effect: no
    /// adapter or device, a dialect this build does not compile, or an image
    /// larger than the device's texture limit. Errors during rendering
    /// itself are still returned.
    #[serde(default = "default_cpu_fallback")]
    pub cpu_fallback: bool,
}

fn default_cpu_fallback() -> bool {
    true
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::new(Effect::default(), Backend::Cpu)
    }
}

impl ProcessConfig {
    pub fn new(effect: Effect, backend: Backend) -> Self {
        Self {
            effect,
            backend,
            cpu_fallback: true,
        }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Apply the configured effect to an image.
pub async fn process_image(
    image: &RgbaImage,
    config: &ProcessConfig,
) -> Result<RgbaImage, PipelineError> {
    match config.backend {
        Backend::Cpu => {
            log::info!("Applying {} on CPU", config.effect.kind().name());
            Ok(config.effect.apply_cpu(image))
        }
        Backend::Gpu(dialect) => {
            let renderer = match EffectRenderer::new().await {
                Ok(renderer) => renderer,
                Err(err) if config.cpu_fallback => {
                    log::warn!("GPU unavailable ({}), falling back to CPU", err);
                    return Ok(config.effect.apply_cpu(image));
                }
                Err(err) => return Err(err.into()),
            };
            log::info!(
                "Applying {} on {} with {} shaders",
                config.effect.kind().name(),
                renderer.adapter_info().name,
                dialect
            );
            match renderer.render(image, &config.effect, dialect) {
                Ok(result) => Ok(result),
                Err(err @ (GpuError::DialectUnavailable(_) | GpuError::InvalidSize { .. }))
                    if config.cpu_fallback =>
                {
                    log::warn!("{}, falling back to CPU", err);
                    Ok(config.effect.apply_cpu(image))
                }
                Err(err) => Err(err.into()),
            }
        }
    }
}

/// Load `input` (which may be a `.hue_offset` path), apply the effect and save to `output`.
pub async fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &ProcessConfig,
) -> Result<(), PipelineError> {
    let image = load_image_with_hue(input.as_ref())?;
    let result = process_image(&image, config).await?;
    result.save(output.as_ref())?;
    log::info!("Wrote {}", output.as_ref().display());
    Ok(())
}
