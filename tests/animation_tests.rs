use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use noise_scene::animation::{boil_scale, boil_shake, light_intensity, AnimationRule, LightRule};
use noise_scene::scene::{PointLight, Transform};
use noise_scene::scenes::{BOIL_POSITION, KNOT_FREQUENCY, KNOT_SPIN_FREQUENCY, KNOT_SPIN_STEP, SHAKE_AMPLITUDE};

fn boil() -> AnimationRule {
    AnimationRule::Boil {
        base_position: BOIL_POSITION,
        shake_amplitude: SHAKE_AMPLITUDE,
    }
}

fn knot() -> AnimationRule {
    AnimationRule::Knot {
        frequency: KNOT_FREQUENCY,
        spin_frequency: KNOT_SPIN_FREQUENCY,
        spin_step: KNOT_SPIN_STEP,
    }
}

#[cfg(test)]
mod pure_rule_tests {
    use super::*;

    #[test]
    fn test_boil_at_time_zero() {
        let mut transform = Transform::default();
        boil().apply(&mut transform, 0.0);
        assert_eq!(transform.scale, Vec3::splat(0.95));
        assert_eq!(transform.position, BOIL_POSITION, "No shake at t=0");
    }

    #[test]
    fn test_boil_replays_regardless_of_history() {
        let t = 4.321;
        let mut fresh = Transform::default();
        boil().apply(&mut fresh, t);

        let mut replayed = Transform::default();
        for i in 0..50 {
            boil().apply(&mut replayed, i as f32 * 0.7);
        }
        boil().apply(&mut replayed, t);

        assert_eq!(fresh, replayed);
        assert!(boil().is_replayable());
        assert_eq!(boil_scale(t), boil_scale(t));
    }

    #[test]
    fn test_knot_peak() {
        let mut transform = Transform::default();
        knot().apply(&mut transform, FRAC_PI_2 / KNOT_FREQUENCY);
        assert!((transform.position.y - 1.0).abs() < 1e-6, "y = {}", transform.position.y);
    }

    #[test]
    fn test_companion_light_follows_shake() {
        let base = Vec3::new(0.0, 4.0, 0.0);
        let rule = LightRule::BoilCompanion {
            base_position: base,
            shake_amplitude: SHAKE_AMPLITUDE,
        };
        let t = 2.2;
        let mut light = PointLight::new("companion", base, [1.0; 3], 1.5);
        rule.apply(&mut light, t, 1.5);

        assert_eq!(light.position, base + boil_shake(t, SHAKE_AMPLITUDE));
        assert_eq!(light.intensity, light_intensity(1.5, t));
    }

    #[test]
    fn test_light_intensity_formula() {
        let t = 0.9_f32;
        let expected = 2.0
            + (t * 15.0).sin() * 0.3
            + (t * 8.0).sin() * 0.2
            + (t * 0.7).sin().abs().powi(2) * 2.0;
        assert!((light_intensity(2.0, t) - expected).abs() < 1e-5);
    }
}

#[cfg(test)]
mod accumulator_tests {
    use super::*;

    #[test]
    fn test_spin_grows_monotonically() {
        let rule = AnimationRule::Spin {
            step: Vec3::new(0.01, 0.01, 0.0),
        };
        let mut transform = Transform::default();
        let mut previous = 0.0;
        for frame in 0..100 {
            rule.apply(&mut transform, frame as f32 / 60.0);
            let magnitude = transform.rotation.length();
            assert!(magnitude >= previous, "rotation shrank at frame {}", frame);
            previous = magnitude;
        }
        assert!(!rule.is_replayable());
    }

    #[test]
    fn test_knot_rotation_depends_on_history() {
        let t_end = 2.0;

        // 60 frames to reach t_end versus 10 frames
        let mut smooth = Transform::default();
        for i in 1..=60 {
            knot().apply(&mut smooth, t_end * i as f32 / 60.0);
        }
        let mut choppy = Transform::default();
        for i in 1..=10 {
            knot().apply(&mut choppy, t_end * i as f32 / 10.0);
        }

        assert_eq!(smooth.position.y, choppy.position.y, "bobbing is a function of t");
        assert_ne!(smooth.rotation, choppy.rotation, "spin depends on the frame count");
        assert!(!knot().is_replayable());
    }

    #[test]
    fn test_orbit_rotation_accumulates() {
        let rule = AnimationRule::Orbit {
            radius: 8.0,
            step: Vec3::new(0.005, 0.01, 0.0025),
        };
        let mut transform = Transform::default();
        rule.apply(&mut transform, 1.0);
        rule.apply(&mut transform, 1.0);
        assert!((transform.rotation - Vec3::new(0.01, 0.02, 0.005)).length() < 1e-6);
        assert!((transform.position.x - 0.5f32.cos() * 8.0).abs() < 1e-5);
    }
}
