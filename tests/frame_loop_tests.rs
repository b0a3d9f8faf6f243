use glam::{Vec2, Vec3};
use noise_scene::animation::{orbit_position, AnimationRule};
use noise_scene::assets::{AssetError, AssetSlot, SlotState};
use noise_scene::camera::{CameraPose, OrbitCamera};
use noise_scene::geometry::box_mesh;
use noise_scene::material::Material;
use noise_scene::params::ParameterSurface;
use noise_scene::scene::{AnimatedObject, SceneRegistry};
use noise_scene::scenes::{asset_orbit, ASSET_ORBIT_RADIUS};
use noise_scene::shading::{shade_fragment, ShaderUniformSet};
use noise_scene::traits::{CameraController, RenderDelegate, SceneProvider};
use noise_scene::{FrameLoop, LoopState, SmokeGarden};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Records what each frame would have drawn
#[derive(Default)]
struct RecordingDelegate {
    frames: Vec<Vec<String>>,
    smoke: Vec<ShaderUniformSet>,
    fail: bool,
}

impl RenderDelegate for RecordingDelegate {
    fn render(&mut self, scene: &SceneRegistry, _camera: &CameraPose) -> anyhow::Result<()> {
        self.frames
            .push(scene.drawables().map(|object| object.name.clone()).collect());
        if let Some(uniforms) = scene.drawables().find_map(|object| object.uniforms()) {
            self.smoke.push(*uniforms);
        }
        if self.fail {
            anyhow::bail!("device lost");
        }
        Ok(())
    }
}

impl RecordingDelegate {
    fn draws_of(&self, name: &str) -> usize {
        self.frames.iter().flatten().filter(|drawn| drawn.as_str() == name).count()
    }
}

fn camera() -> CameraPose {
    OrbitCamera::new(Vec3::ZERO, 12.0).pose()
}

fn cube(name: &str) -> AnimatedObject {
    AnimatedObject::new(name, box_mesh(Vec3::ONE), Material::default())
}

#[cfg(test)]
mod pending_slot_tests {
    use super::*;

    #[test]
    fn test_slot_that_never_resolves() {
        let mut scene = SmokeGarden.build();
        let (slot, _completer) = AssetSlot::pending("never.gltf");
        scene.add_asset(slot, asset_orbit());

        let mut frame_loop = FrameLoop::new(scene);
        let params = ParameterSurface::new();
        let mut delegate = RecordingDelegate::default();

        for frame in 0..600 {
            let report = frame_loop.tick(frame as f64 * FRAME_MS, &params, &camera(), &mut delegate);
            assert!(report.render.is_ok());
            assert_eq!(report.pending_slots, 1);
            assert_eq!(report.drawn_objects, 4);
        }

        assert_eq!(delegate.frames.len(), 600, "exactly one render per frame");
        assert_eq!(delegate.draws_of("never.gltf"), 0);
        assert!(matches!(frame_loop.scene().assets()[0].slot.state(), SlotState::Loading));

        let solid = frame_loop.scene().object("solid").unwrap();
        assert!((solid.transform.rotation.x - 6.0).abs() < 1e-3, "solid kept spinning");
    }

    #[test]
    fn test_failed_and_empty_slots_are_skipped() {
        let mut scene = SceneRegistry::new();
        scene.add_object(cube("cube"), AnimationRule::Static);
        scene.add_asset(AssetSlot::empty("orbit"), asset_orbit());
        scene.add_asset(
            AssetSlot::failed(
                "broken.gltf",
                AssetError::Source {
                    path: "broken.gltf".into(),
                    message: "not found".into(),
                },
            ),
            asset_orbit(),
        );
        let (abandoned, completer) = AssetSlot::pending("dropped.gltf");
        drop(completer);
        scene.add_asset(abandoned, asset_orbit());

        let mut frame_loop = FrameLoop::new(scene);
        let mut delegate = RecordingDelegate::default();
        for frame in 0..10 {
            frame_loop.tick(frame as f64 * FRAME_MS, &ParameterSurface::new(), &camera(), &mut delegate);
        }

        assert_eq!(delegate.frames.len(), 10);
        assert!(delegate.frames.iter().all(|drawn| drawn == &vec!["cube".to_string()]));
        assert!(matches!(
            frame_loop.scene().assets()[2].slot.state(),
            SlotState::Failed(AssetError::Abandoned(_))
        ));
    }

    #[test]
    fn test_slot_joins_between_frames() {
        let mut scene = SceneRegistry::new();
        let (slot, completer) = AssetSlot::pending("late.gltf");
        scene.add_asset(slot, asset_orbit());

        let mut frame_loop = FrameLoop::new(scene);
        let mut delegate = RecordingDelegate::default();
        let params = ParameterSurface::new();

        frame_loop.tick(0.0, &params, &camera(), &mut delegate);
        completer.complete(Ok(cube("late")));
        let report = frame_loop.tick(2000.0, &params, &camera(), &mut delegate);

        assert_eq!(report.pending_slots, 0);
        assert_eq!(delegate.frames[0], Vec::<String>::new());
        assert_eq!(delegate.frames[1], vec!["late".to_string()]);

        let late = frame_loop.scene().object("late").unwrap();
        let expected = orbit_position(2.0, ASSET_ORBIT_RADIUS);
        assert!((late.transform.position - expected).length() < 1e-5);
    }
}

#[cfg(test)]
mod parameter_tests {
    use super::*;

    #[test]
    fn test_opacity_change_applies_next_frame() {
        let mut frame_loop = FrameLoop::new(SmokeGarden.build());
        let mut delegate = RecordingDelegate::default();
        let mut params = ParameterSurface::new();
        params.set_opacity(0.7).unwrap();

        frame_loop.tick(0.0, &params, &camera(), &mut delegate);
        params.set_opacity(0.2).unwrap();
        frame_loop.tick(FRAME_MS, &params, &camera(), &mut delegate);

        assert_eq!(delegate.smoke[0].opacity, Some(0.7));
        assert_eq!(delegate.smoke[1].opacity, Some(0.2));
    }

    #[test]
    fn test_fragment_alpha_bounds() {
        for opacity in [0.0, 0.2, 0.7, 1.0] {
            let uniforms = ShaderUniformSet::new(1.7, [0.4, 0.8, 1.0], opacity).resolve();
            for i in 0..50 {
                for j in 0..50 {
                    let local = Vec2::new(i as f32 * 0.043 - 1.0, j as f32 * 0.043 - 1.0);
                    let alpha = shade_fragment(local.extend(0.3), &uniforms).alpha;
                    assert!(
                        alpha >= 0.4 * opacity - 1e-6 && alpha <= opacity + 1e-6,
                        "alpha {} outside [{}, {}]",
                        alpha,
                        0.4 * opacity,
                        opacity
                    );
                }
            }
        }
    }

    #[test]
    fn test_light_intensity_parameter_reaches_companion() {
        let mut frame_loop = FrameLoop::new(SmokeGarden.build());
        let mut delegate = RecordingDelegate::default();
        let mut params = ParameterSurface::new();
        params.set_light_intensity(5.0).unwrap();

        frame_loop.tick(0.0, &params, &camera(), &mut delegate);
        let companion = frame_loop.scene().light("companion").unwrap();
        assert!((companion.intensity - 5.0).abs() < 1e-6, "t=0 adds no flicker");
    }
}

#[cfg(test)]
mod loop_state_tests {
    use super::*;

    #[test]
    fn test_render_errors_do_not_stop_the_loop() {
        let mut frame_loop = FrameLoop::new(SmokeGarden.build());
        let mut delegate = RecordingDelegate {
            fail: true,
            ..RecordingDelegate::default()
        };

        for frame in 0..3 {
            let report = frame_loop.tick(frame as f64 * FRAME_MS, &ParameterSurface::new(), &camera(), &mut delegate);
            assert!(report.render.is_err());
        }
        assert_eq!(frame_loop.state(), LoopState::Running);
        assert_eq!(frame_loop.time().frame_count(), 3);
    }

    #[test]
    fn test_boil_at_first_frame() {
        let mut frame_loop = FrameLoop::new(SmokeGarden.build());
        let mut delegate = RecordingDelegate::default();
        frame_loop.tick(0.0, &ParameterSurface::new(), &camera(), &mut delegate);

        let smoke = frame_loop.scene().object("smoke").unwrap();
        assert_eq!(smoke.transform.scale, Vec3::splat(0.95));
        assert_eq!(smoke.uniforms().and_then(|u| u.time), Some(0.0));
    }

    #[test]
    fn test_time_never_rewinds() {
        let mut frame_loop = FrameLoop::new(SmokeGarden.build());
        let mut delegate = RecordingDelegate::default();
        let params = ParameterSurface::new();

        let first = frame_loop.tick(5000.0, &params, &camera(), &mut delegate);
        let second = frame_loop.tick(4000.0, &params, &camera(), &mut delegate);
        assert_eq!(first.info.time, 5.0);
        assert_eq!(second.info.time, 5.0);
    }
}

#[test]
fn test_camera_controller_pose_is_stable() {
    let mut orbit = OrbitCamera::new(Vec3::ZERO, 12.0);
    orbit.update(0.016);
    assert_eq!(orbit.pose(), camera());
}
