//! Benchmarks for the CPU reference effects.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sprite_fx::effects::to_f32_image;
use sprite_fx::{rotate_hue, synth, Effect, GlowParams, HueRotateParams};

fn bench_rotate_hue_texel(c: &mut Criterion) {
    c.bench_function("rotate_hue_texel", |b| {
        b.iter(|| black_box(rotate_hue(black_box([0.8, 0.3, 0.1, 1.0]), black_box(0.37))));
    });
}

fn bench_effect_resolutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("CPU Effects");

    let resolutions = [(64, 64, "64px"), (256, 256, "256px"), (1024, 1024, "1024px")];
    let effects = [
        ("hue", Effect::HueRotate(HueRotateParams { offset: 0.25 })),
        (
            "glow",
            Effect::Glow(GlowParams {
                color: [1.0, 0.8, 0.2],
                intensity: 1.5,
            }),
        ),
    ];

    for (width, height, name) in resolutions {
        let radius = width as f32 * 0.3;
        let sprite = synth::soft_disc(width, height, radius, radius * 0.25, [60, 180, 240]);

        for (effect_name, effect) in &effects {
            group.bench_with_input(
                BenchmarkId::new(*effect_name, name),
                &sprite,
                |b, sprite| {
                    b.iter(|| black_box(effect.apply_cpu(sprite)));
                },
            );
        }
    }

    group.finish();
}

fn bench_glow_f32(c: &mut Criterion) {
    let sprite = to_f32_image(&synth::soft_disc(256, 256, 80.0, 20.0, [255, 255, 255]));
    let effect = Effect::Glow(GlowParams::default());

    c.bench_function("glow_f32_256px", |b| {
        b.iter(|| black_box(effect.apply_cpu_f32(&sprite)));
    });
}

criterion_group!(
    benches,
    bench_rotate_hue_texel,
    bench_effect_resolutions,
    bench_glow_f32
);
criterion_main!(benches);
