//! Per-object animation rules.
//!
//! Two kinds of rule live here. Pure rules (`Boil`, the position part of `Knot`,
//! `Orbit` position, light intensity) are functions of the scaled time alone and replay
//! identically at the same `t`. Accumulator rules (`Spin`, knot and orbit rotation)
//! add a step every frame, so their value depends on how many frames ran, not on `t`.

use glam::Vec3;

use crate::scene::{PointLight, Transform};

/// Angular frequency of the boiling pulse
pub const BOIL_FREQUENCY: f32 = 0.7;
/// Frequencies of the three shake axes
pub const SHAKE_FREQUENCIES: [f32; 3] = [23.0, 29.0, 31.0];

/// Uniform scale of the boiling object: `|sin(0.7t)|·0.15 + 0.95`
pub fn boil_scale(t: f32) -> f32 {
    (t * BOIL_FREQUENCY).sin().abs() * 0.15 + 0.95
}

/// How hard the boiling object shakes, `pow(|sin(0.7t)|, 3)·2.5`
pub fn boil_intensity(t: f32) -> f32 {
    (t * BOIL_FREQUENCY).sin().abs().powi(3) * 2.5
}

/// High-frequency shake offset, zero whenever the pulse is at rest
pub fn boil_shake(t: f32, amplitude: f32) -> Vec3 {
    let [fx, fy, fz] = SHAKE_FREQUENCIES;
    Vec3::new((t * fx).sin(), (t * fy).cos(), (t * fz).sin()) * amplitude * boil_intensity(t)
}

/// Light flicker term in [-0.5, 0.5]
pub fn flicker(t: f32) -> f32 {
    (t * 15.0).sin() * 0.3 + (t * 8.0).sin() * 0.2
}

/// Companion light intensity for a given operator base intensity
pub fn light_intensity(base: f32, t: f32) -> f32 {
    base + flicker(t) + (t * BOIL_FREQUENCY).sin().abs().powi(2) * 2.0
}

/// Position on the asset orbit: `(cos(t·0.5)·R, 3 + sin(t·0.8)·5, sin(t·0.5)·R)`
pub fn orbit_position(t: f32, radius: f32) -> Vec3 {
    Vec3::new(
        (t * 0.5).cos() * radius,
        3.0 + (t * 0.8).sin() * 5.0,
        (t * 0.5).sin() * radius,
    )
}

/// Animation rule attached to a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationRule {
    /// Never moves
    Static,
    /// Adds `step` to the rotation every frame
    Spin { step: Vec3 },
    /// Bobs with `y = sin(t·frequency)` and tumbles by `(cos(t·spin_frequency) + 1)·spin_step`
    Knot {
        frequency: f32,
        spin_frequency: f32,
        spin_step: f32,
    },
    /// Pulsing scale plus shake around a fixed base position
    Boil { base_position: Vec3, shake_amplitude: f32 },
    /// Circles the scene on the asset orbit and tumbles by `step` per frame
    Orbit { radius: f32, step: Vec3 },
}

impl AnimationRule {
    pub fn apply(&self, transform: &mut Transform, t: f32) {
        match *self {
            AnimationRule::Static => {}
            AnimationRule::Spin { step } => {
                transform.rotation += step;
            }
            AnimationRule::Knot {
                frequency,
                spin_frequency,
                spin_step,
            } => {
                transform.position.y = (t * frequency).sin();
                let spin = ((t * spin_frequency).cos() + 1.0) * spin_step;
                transform.rotation.x += spin;
                transform.rotation.z += spin;
            }
            AnimationRule::Boil {
                base_position,
                shake_amplitude,
            } => {
                transform.scale = Vec3::splat(boil_scale(t));
                transform.position = base_position + boil_shake(t, shake_amplitude);
            }
            AnimationRule::Orbit { radius, step } => {
                transform.position = orbit_position(t, radius);
                transform.rotation += step;
            }
        }
    }

    /// True when the full transform can be rebuilt from `t` alone
    pub fn is_replayable(&self) -> bool {
        matches!(self, AnimationRule::Static | AnimationRule::Boil { .. })
    }
}

/// Animation rule attached to a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightRule {
    /// Keeps the intensity it was built with
    Static,
    /// Flickers with the boiling pulse and shakes with the boiling object
    BoilCompanion { base_position: Vec3, shake_amplitude: f32 },
}

impl LightRule {
    /// `base_intensity` comes from the operator parameter surface
    pub fn apply(&self, light: &mut PointLight, t: f32, base_intensity: f32) {
        match *self {
            LightRule::Static => {}
            LightRule::BoilCompanion {
                base_position,
                shake_amplitude,
            } => {
                light.intensity = light_intensity(base_intensity, t);
                light.position = base_position + boil_shake(t, shake_amplitude);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boil_at_rest() {
        assert_eq!(boil_scale(0.0), 0.95);
        assert_eq!(boil_shake(0.0, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_boil_scale_bounds() {
        for i in 0..1000 {
            let s = boil_scale(i as f32 * 0.037);
            assert!((0.95..=1.1 + 1e-6).contains(&s));
        }
    }

    #[test]
    fn test_flicker_bounds() {
        for i in 0..1000 {
            assert!(flicker(i as f32 * 0.011).abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_spin_accumulates() {
        let rule = AnimationRule::Spin { step: Vec3::new(0.01, 0.02, 0.0) };
        let mut transform = Transform::default();
        rule.apply(&mut transform, 0.0);
        rule.apply(&mut transform, 0.0);
        assert!((transform.rotation - Vec3::new(0.02, 0.04, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_static_light_unchanged() {
        let mut light = PointLight::new("fill", Vec3::ONE, [1.0; 3], 0.8);
        LightRule::Static.apply(&mut light, 3.0, 5.0);
        assert_eq!(light.intensity, 0.8);
        assert_eq!(light.position, Vec3::ONE);
    }
}
