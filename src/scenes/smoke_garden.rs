use glam::Vec3;
use log::info;

use crate::animation::{AnimationRule, LightRule};
use crate::geometry::{icosphere, plane, torus_knot};
use crate::material::Material;
use crate::math::{hsv_to_rgb, rgb_from_hex};
use crate::params::DEFAULT_LIGHT_INTENSITY;
use crate::scene::{AnimatedObject, PointLight, SceneRegistry, Shading, Transform};
use crate::shading::ShaderUniformSet;
use crate::traits::SceneProvider;

pub const GROUND_SIZE: f32 = 20.0;
pub const GROUND_COLOR: u32 = 0xcccccc;
pub const SPIN_STEP: Vec3 = Vec3::new(0.01, 0.01, 0.0);
pub const KNOT_FREQUENCY: f32 = 1.0;
pub const KNOT_SPIN_FREQUENCY: f32 = 0.5;
pub const KNOT_SPIN_STEP: f32 = 0.01;
pub const BOIL_POSITION: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const SHAKE_AMPLITUDE: f32 = 0.04;
pub const ASSET_ORBIT_RADIUS: f32 = 8.0;
pub const ASSET_SPIN_STEP: Vec3 = Vec3::new(0.005, 0.01, 0.0025);

/// Light offset above the boiling object
const COMPANION_OFFSET: Vec3 = Vec3::new(0.0, 2.5, 0.0);

/// Rule for a model loaded into the garden once its slot is ready
pub fn asset_orbit() -> AnimationRule {
    AnimationRule::Orbit {
        radius: ASSET_ORBIT_RADIUS,
        step: ASSET_SPIN_STEP,
    }
}

/// Ground, a spinning solid, a bobbing knot and the boiling smoke ball with its light
pub struct SmokeGarden;

impl SceneProvider for SmokeGarden {
    fn build(&self) -> SceneRegistry {
        let mut scene = SceneRegistry::new();
        scene.clear_color = [0.05, 0.05, 0.08];

        let ground = AnimatedObject::new(
            "ground",
            plane(GROUND_SIZE, GROUND_SIZE),
            Material::color(rgb_from_hex(GROUND_COLOR)).with_name("ground"),
        );
        scene.add_object(ground, AnimationRule::Static);

        let solid = AnimatedObject::new(
            "solid",
            icosphere(0.8, 0),
            Material::color(hsv_to_rgb(0.08, 0.7, 0.95)).with_name("solid"),
        )
        .with_transform(Transform::from_position(Vec3::new(-3.0, 1.2, 0.0)));
        scene.add_object(solid, AnimationRule::Spin { step: SPIN_STEP });

        let knot = AnimatedObject::new(
            "knot",
            torus_knot(0.7, 0.22, 128, 16, 2, 3),
            Material::color(hsv_to_rgb(0.75, 0.6, 0.9)).with_name("knot"),
        )
        .with_transform(Transform::from_position(Vec3::new(3.0, 0.0, 0.0)));
        scene.add_object(
            knot,
            AnimationRule::Knot {
                frequency: KNOT_FREQUENCY,
                spin_frequency: KNOT_SPIN_FREQUENCY,
                spin_step: KNOT_SPIN_STEP,
            },
        );

        let smoke = AnimatedObject::new("smoke", icosphere(1.0, 4), Material::default().with_name("smoke"))
            .with_transform(Transform::from_position(BOIL_POSITION))
            .with_shading(Shading::Smoke(ShaderUniformSet::default()));
        scene.add_object(
            smoke,
            AnimationRule::Boil {
                base_position: BOIL_POSITION,
                shake_amplitude: SHAKE_AMPLITUDE,
            },
        );

        let companion_base = BOIL_POSITION + COMPANION_OFFSET;
        scene.add_light(
            PointLight::new("companion", companion_base, [1.0, 0.85, 0.6], DEFAULT_LIGHT_INTENSITY),
            LightRule::BoilCompanion {
                base_position: companion_base,
                shake_amplitude: SHAKE_AMPLITUDE,
            },
        );
        scene.add_light(
            PointLight::new("fill", Vec3::new(-6.0, 8.0, 6.0), [0.7, 0.8, 1.0], 0.8),
            LightRule::Static,
        );

        info!(
            "Built '{}': {} objects, {} lights",
            self.name(),
            scene.entries().len(),
            scene.lights().len()
        );
        scene
    }

    fn name(&self) -> &str {
        "smoke garden"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_smoke_carries_uniforms() {
        let scene = SmokeGarden.build();
        let with_uniforms: Vec<_> = scene
            .drawables()
            .filter(|object| object.uniforms().is_some())
            .map(|object| object.name.as_str())
            .collect();
        assert_eq!(with_uniforms, vec!["smoke"]);
    }

    #[test]
    fn test_scene_contents() {
        let scene = SmokeGarden.build();
        assert_eq!(scene.entries().len(), 4);
        assert_eq!(scene.lights().len(), 2);
        assert!(scene.assets().is_empty());
        assert_eq!(scene.object("ground").map(|o| o.transform.position), Some(Vec3::ZERO));
    }
}
