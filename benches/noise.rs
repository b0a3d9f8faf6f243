use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use noise_scene::geometry::icosphere;
use noise_scene::math::noise::{gradient_noise3, value_noise2};
use noise_scene::params::ParameterSurface;
use noise_scene::scene::SceneRegistry;
use noise_scene::shading::{displace_vertex, shade_fragment, ShaderUniformSet};
use noise_scene::traits::{CameraController, RenderDelegate, SceneProvider};
use noise_scene::camera::{CameraPose, OrbitCamera};
use noise_scene::{FrameLoop, SmokeGarden};

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise");

    group.bench_function("gradient_noise3", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.013;
            black_box(gradient_noise3(black_box(Vec3::new(x, x * 0.7, x * 1.3))))
        })
    });

    group.bench_function("value_noise2", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.013;
            black_box(value_noise2(black_box(Vec2::new(x, x * 0.7))))
        })
    });

    group.finish();
}

fn bench_smoke_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoke_material");
    let uniforms = ShaderUniformSet::new(3.5, [0.4, 0.8, 1.0], 0.7).resolve();

    for subdivisions in [2u32, 3, 4] {
        let mesh = icosphere(1.0, subdivisions);
        group.bench_with_input(
            BenchmarkId::new("displace_mesh", mesh.vertices().len()),
            &mesh,
            |b, mesh| {
                b.iter(|| {
                    for v in mesh.vertices() {
                        black_box(displace_vertex(
                            Vec3::from_array(v.position),
                            Vec3::from_array(v.normal),
                            &uniforms,
                        ));
                    }
                })
            },
        );
    }

    group.bench_function("shade_fragment_64x64", |b| {
        b.iter(|| {
            for i in 0..64 {
                for j in 0..64 {
                    let local = Vec3::new(i as f32 / 32.0 - 1.0, j as f32 / 32.0 - 1.0, 0.0);
                    black_box(shade_fragment(local, &uniforms));
                }
            }
        })
    });

    group.finish();
}

struct NullDelegate;

impl RenderDelegate for NullDelegate {
    fn render(&mut self, scene: &SceneRegistry, _camera: &CameraPose) -> anyhow::Result<()> {
        black_box(scene.drawables().count());
        Ok(())
    }
}

fn bench_frame_loop(c: &mut Criterion) {
    let mut frame_loop = FrameLoop::new(SmokeGarden.build());
    let params = ParameterSurface::new();
    let camera = OrbitCamera::new(Vec3::ZERO, 12.0).pose();
    let mut clock_ms = 0.0;

    c.bench_function("frame_loop_tick", |b| {
        b.iter(|| {
            clock_ms += 16.0;
            black_box(frame_loop.tick(clock_ms, &params, &camera, &mut NullDelegate))
        })
    });
}

criterion_group!(benches, bench_noise, bench_smoke_stages, bench_frame_loop);
criterion_main!(benches);
