//! Example: Apply the sprite effects to synthetic sprites.
//!
//! Generates a hue sweep and a soft-edged sprite, runs both effects on the
//! CPU and on every available GPU shader dialect, and writes PNGs to
//! `effects_demo/`.
//!
//! Run with:
//!     cargo run --example apply_effects --features tokio
//!
//! An optional argument sets the glow colour, e.g. `#ffcc00`.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use sprite_fx::{
    parse_hex_color, process_file, synth, Backend, Effect, EffectRenderer, GlowParams,
    HueRotateParams, ProcessConfig, ShaderDialect,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("Sprite FX - Synthetic Sprite Example");
    println!("====================================\n");

    let glow_color = match std::env::args().nth(1) {
        Some(hex) => parse_hex_color(&hex).ok_or_else(|| anyhow!("Invalid colour: {}", hex))?,
        None => [1.0, 0.8, 0.2],
    };

    let out_dir = Path::new("effects_demo");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    let wheel = synth::hue_wheel(360, 64);
    let sprite = synth::soft_disc(128, 128, 36.0, 16.0, [60, 180, 240]);
    wheel.save(out_dir.join("wheel.png"))?;
    sprite.save(out_dir.join("sprite.png"))?;

    let hue = Effect::HueRotate(HueRotateParams::from_degrees(120.0));
    let glow = Effect::Glow(GlowParams {
        color: glow_color,
        intensity: 1.5,
    });

    println!("Rendering on CPU...");
    hue.apply_cpu(&wheel).save(out_dir.join("wheel_hue_cpu.png"))?;
    glow.apply_cpu(&sprite).save(out_dir.join("sprite_glow_cpu.png"))?;

    match EffectRenderer::new().await {
        Ok(renderer) => {
            println!("  GPU: {}\n", renderer.adapter_info().name);
            for dialect in ShaderDialect::all() {
                if !renderer.supports(*dialect) {
                    println!("Skipping {} (not enabled in this build)", dialect);
                    continue;
                }
                println!("Rendering with {} shaders...", dialect);
                renderer
                    .render(&wheel, &hue, *dialect)?
                    .save(out_dir.join(format!("wheel_hue_{}.png", dialect)))?;
                renderer
                    .render(&sprite, &glow, *dialect)?
                    .save(out_dir.join(format!("sprite_glow_{}.png", dialect)))?;
            }
        }
        Err(e) => println!("No GPU available ({}), skipping GPU renders", e),
    }

    // Recolour at load time through a virtual path, then glow the result
    println!("\nProcessing sprite.png/240.hue_offset...");
    let config = ProcessConfig::new(glow, Backend::Gpu(ShaderDialect::Wgsl));
    process_file(
        out_dir.join("sprite.png").join("240.hue_offset"),
        out_dir.join("sprite_240_glow.png"),
        &config,
    )
    .await?;

    println!("\nDone! Output in: {}", out_dir.display());

    Ok(())
}
