use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spherust::bench::{FlatShader, PhongShader, SphereShader};
use spherust::prelude::*;

const BUFFER_WIDTH: u32 = 1024;
const BUFFER_HEIGHT: u32 = 1024;

fn centered_sphere(screen_radius: f32) -> ProjectedSphere {
    ProjectedSphere {
        screen_x: 0.0,
        screen_y: 0.0,
        screen_z: 1.5,
        screen_radius,
        color: 0x00CC_8833,
    }
}

/// A deterministic shell of spheres around the origin.
fn sphere_field() -> SphereData {
    let mut spheres = Vec::new();
    for i in 1..25 {
        for j in 0..40 {
            let theta = i as f32 / 25.0 * std::f32::consts::PI;
            let phi = j as f32 / 40.0 * std::f32::consts::TAU;
            spheres.push(Sphere {
                position: Vec3::new(
                    theta.sin() * phi.cos(),
                    theta.cos(),
                    theta.sin() * phi.sin(),
                ),
                radius: 0.02 + 0.01 * (i as f32 / 25.0),
                color: 0x0033_6699 + (i as u32) * 7 + (j as u32) * 13,
            });
        }
    }
    SphereData::from_spheres(spheres)
}

fn benchmark_single_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_sphere");

    for (name, screen_radius) in [("small", 0.01), ("medium", 0.05), ("large", 0.2)] {
        let sphere = centered_sphere(screen_radius);

        for mode in [ShadingMode::Flat, ShadingMode::Phong] {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), name),
                &sphere,
                |b, sphere| {
                    let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                    fb.set_shading_mode(mode);
                    b.iter(|| {
                        fb.clear();
                        fb.render_sphere(black_box(sphere));
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_sphere_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_field");
    group.sample_size(20);

    for mode in [ShadingMode::Flat, ShadingMode::Phong] {
        group.bench_function(BenchmarkId::new(mode.to_string(), "960_spheres"), |b| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            fb.set_shading_mode(mode);
            let mut scene = sphere_field();
            b.iter(|| {
                fb.clear();
                scene.render(&fb, black_box(1.9));
            });
        });
    }

    group.finish();
}

fn benchmark_shaders(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader");

    let light = Vec3::new(1.0, -0.5, 0.7).normalize();
    let flat = FlatShader::new(0x00CC_8833);
    let phong = PhongShader::new(0x00CC_8833, 0.1, -0.2, 32.0, light);

    group.bench_function("flat_32px_disc", |b| {
        b.iter(|| {
            for dy in -32..=32 {
                for dx in -32..=32 {
                    black_box(flat.shade(black_box(dx), black_box(dy)));
                }
            }
        });
    });

    group.bench_function("phong_32px_disc", |b| {
        b.iter(|| {
            for dy in -32..=32 {
                for dx in -32..=32 {
                    black_box(phong.shade(black_box(dx), black_box(dy)));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_sphere,
    benchmark_sphere_field,
    benchmark_shaders
);
criterion_main!(benches);
