//! CPU model of the smoke material.
//!
//! `src/shaders/smoke.wgsl` runs the same two stages on the GPU. This module is the
//! reference the shader is checked against and what the frame loop uses to resolve the
//! uniform block it uploads.

use glam::{Vec2, Vec3};

use crate::math::{gradient_noise3, value_noise2};
use crate::types::SmokeUniform;

/// Spatial frequency of the vertex displacement noise
pub const NOISE_SCALE: f32 = 1.5;
/// How fast the displacement field scrolls upward per unit of time
pub const NOISE_SPEED: f32 = 0.6;
/// Maximum displacement along the normal
pub const DISPLACEMENT_SCALE: f32 = 0.25;

pub const DEFAULT_TIME: f32 = 0.0;
pub const DEFAULT_BASE_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
pub const DEFAULT_OPACITY: f32 = 1.0;

/// Fixed pipeline state of the smoke material.
///
/// Transparent single-layer surface: both faces are drawn and depth is tested but not
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmokeMaterial {
    pub double_sided: bool,
    pub alpha_blend: bool,
    pub depth_write: bool,
}

impl SmokeMaterial {
    pub const STATE: SmokeMaterial = SmokeMaterial {
        double_sided: true,
        alpha_blend: true,
        depth_write: false,
    };
}

/// Uniform block of one smoke material instance.
///
/// Any field may be absent this frame (for example before the first parameter
/// snapshot reaches it); [`ShaderUniformSet::resolve`] substitutes defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShaderUniformSet {
    pub time: Option<f32>,
    pub base_color: Option<[f32; 3]>,
    pub opacity: Option<f32>,
}

/// Uniform values with every default applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedUniforms {
    pub time: f32,
    pub base_color: Vec3,
    pub opacity: f32,
}

impl ShaderUniformSet {
    pub fn new(time: f32, base_color: [f32; 3], opacity: f32) -> Self {
        Self {
            time: Some(time),
            base_color: Some(base_color),
            opacity: Some(opacity),
        }
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = Some(time);
    }

    pub fn set_base_color(&mut self, base_color: [f32; 3]) {
        self.base_color = Some(base_color);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = Some(opacity);
    }

    /// Names of the uniforms that will fall back to defaults
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.time.is_none() {
            missing.push("time");
        }
        if self.base_color.is_none() {
            missing.push("baseColor");
        }
        if self.opacity.is_none() {
            missing.push("opacity");
        }
        missing
    }

    pub fn resolve(&self) -> ResolvedUniforms {
        ResolvedUniforms {
            time: self.time.unwrap_or(DEFAULT_TIME),
            base_color: Vec3::from_array(self.base_color.unwrap_or(DEFAULT_BASE_COLOR)),
            opacity: self.opacity.unwrap_or(DEFAULT_OPACITY),
        }
    }
}

impl ResolvedUniforms {
    pub fn to_gpu(&self) -> SmokeUniform {
        SmokeUniform {
            base_color: self.base_color.to_array(),
            time: self.time,
            opacity: self.opacity,
            _pad: [0.0; 3],
        }
    }
}

/// Vertex stage: push a surface point along its normal by the scrolling noise field
pub fn displace_vertex(position: Vec3, normal: Vec3, uniforms: &ResolvedUniforms) -> Vec3 {
    let sample = Vec3::new(
        position.x * NOISE_SCALE,
        position.y * NOISE_SCALE + uniforms.time * NOISE_SPEED,
        position.z * NOISE_SCALE,
    );
    let noise = gradient_noise3(sample);
    position + normal.normalize_or_zero() * noise * DISPLACEMENT_SCALE
}

/// Weighted sum of three value-noise octaves, in [0, 1]
pub fn combined_noise(local: Vec2, time: f32) -> f32 {
    let n1 = value_noise2(local * 2.0 + Vec2::new(time * 0.2, time * 0.3));
    let n2 = value_noise2(local * 5.0 - Vec2::new(time * 0.4, time * 0.1));
    let n3 = value_noise2(local * 11.0 + Vec2::new(time * 0.7, -time * 0.5));
    n1 * 0.5 + n2 * 0.3 + n3 * 0.2
}

/// Maps combined noise into [0.4, 1.0]
pub fn transparency(combined: f32) -> f32 {
    combined * 0.6 + 0.4
}

/// Slow vertical brightness band in [0, 1]
pub fn brightness_wave(y: f32, time: f32) -> f32 {
    (y * 2.0 + time).sin() * 0.5 + 0.5
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentOutput {
    pub color: Vec3,
    pub alpha: f32,
}

/// Fragment stage evaluated at a point in the mesh's local space
pub fn shade_fragment(local: Vec3, uniforms: &ResolvedUniforms) -> FragmentOutput {
    let combined = combined_noise(Vec2::new(local.x, local.y), uniforms.time);
    let wave = brightness_wave(local.y, uniforms.time);
    let color = (uniforms.base_color + Vec3::splat(combined * 0.2)) * (0.7 + wave * 0.3);

    FragmentOutput {
        color,
        alpha: uniforms.opacity * transparency(combined),
    }
}
