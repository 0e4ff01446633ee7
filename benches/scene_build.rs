use bicycle_scene::build_bicycle;
use bicycle_scene::config::{BikeConfig, SceneConfig};
use bicycle_scene::mesh::Mesh;
use bicycle_scene::scene::Scene;
use bicycle_scene::types::GpuVertex;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f32::consts::PI;

/// Benchmark: Build the full bicycle subtree, tessellation included
fn bench_build_bicycle(c: &mut Criterion) {
    let config = BikeConfig::default();
    c.bench_function("build_bicycle", |b| {
        b.iter(|| build_bicycle(black_box(&config)))
    });
}

/// Benchmark: Torus tessellation at increasing resolution
fn bench_torus(c: &mut Criterion) {
    let mut group = c.benchmark_group("torus_tessellation");
    for tubular in [25u32, 100, 400] {
        group.bench_with_input(BenchmarkId::from_parameter(tubular), &tubular, |b, &tubular| {
            b.iter(|| Mesh::torus(20.0, 2.0, 16, black_box(tubular)))
        });
    }
    group.finish();
}

/// Benchmark: One animation step plus flattening into GPU vertices
fn bench_frame_geometry(c: &mut Criterion) {
    let mut scene = Scene::from_config(&SceneConfig::default());
    let mut vertices: Vec<GpuVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut time = 0.0f32;

    c.bench_function("frame_geometry", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            scene.advance(PI / 100.0, time);
            scene.write_geometry(&mut vertices, &mut indices);
            black_box(indices.len())
        })
    });
}

criterion_group!(benches, bench_build_bicycle, bench_torus, bench_frame_geometry);
criterion_main!(benches);
