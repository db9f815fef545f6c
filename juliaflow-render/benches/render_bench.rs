use criterion::{criterion_group, criterion_main, Criterion};

use juliaflow_core::{Complex, FractalParameters, Viewport};
use juliaflow_render::{
    render, Backend, InputEvent, Orchestrator, Palette, RenderConfig, SequentialBackend,
};

fn bench_kernel_pass(c: &mut Criterion) {
    let viewport = Viewport::default_julia(320, 240);
    let params = FractalParameters::default().with_max_iterations(500);
    let parallel = Backend::with_threads(0);

    c.bench_function("kernel_320x240_rayon", |b| {
        b.iter(|| render(&viewport, &params, &parallel));
    });
    c.bench_function("kernel_320x240_sequential", |b| {
        b.iter(|| render(&viewport, &params, &SequentialBackend));
    });
}

fn bench_iteration_throughput(c: &mut Criterion) {
    let viewport = Viewport::new(Complex::ZERO, 3.0, 3.0, 256, 256).unwrap();
    let params = FractalParameters::new(Complex::new(-1.0, 0.0), 2000, 4.0).unwrap();
    let backend = Backend::with_threads(0);

    c.bench_function("kernel_256x256_basilica_2000iter", |b| {
        b.iter(|| render(&viewport, &params, &backend));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let viewport = Viewport::default_julia(640, 480);
    let params = FractalParameters::default().with_max_iterations(500);
    let result = render(&viewport, &params, &Backend::with_threads(0));
    let palette = Palette::default();

    c.bench_function("colorize_640x480", |b| {
        b.iter(|| palette.colorize(&result.iterations));
    });
}

fn bench_animation_tick(c: &mut Criterion) {
    let config = RenderConfig {
        width: 200,
        height: 200,
        max_iterations: 500,
        ..RenderConfig::default()
    };
    let mut orchestrator = Orchestrator::new(&config).unwrap();
    orchestrator.apply(InputEvent::ToggleAnimation);
    orchestrator.apply(InputEvent::ToggleAuto);

    c.bench_function("tick_200x200_auto", |b| {
        b.iter(|| orchestrator.tick());
    });
}

criterion_group!(
    benches,
    bench_kernel_pass,
    bench_iteration_throughput,
    bench_colorize,
    bench_animation_tick
);
criterion_main!(benches);
