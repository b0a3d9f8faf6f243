//! Operator-tunable values read by the frame loop.
//!
//! Confined to the frame thread: panel callbacks write between frames and the loop
//! takes one [`ParamSnapshot`] at the start of each frame. A multithreaded host would
//! need to hand that snapshot across threads instead of sharing the surface.

use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::rgb_from_hex;

pub const DEFAULT_BASE_COLOR: u32 = 0x66ccff;
pub const DEFAULT_OPACITY: f32 = 0.7;
pub const DEFAULT_LIGHT_INTENSITY: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    BaseColor,
    Opacity,
    LightIntensity,
}

impl ParamKey {
    pub const ALL: [ParamKey; 3] = [ParamKey::BaseColor, ParamKey::Opacity, ParamKey::LightIntensity];

    pub fn label(self) -> &'static str {
        match self {
            ParamKey::BaseColor => "Color",
            ParamKey::Opacity => "Opacity",
            ParamKey::LightIntensity => "Light intensity",
        }
    }

    /// Inclusive valid range (per channel for colors)
    pub fn range(self) -> (f32, f32) {
        match self {
            ParamKey::BaseColor | ParamKey::Opacity => (0.0, 1.0),
            ParamKey::LightIntensity => (0.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Color([f32; 3]),
}

/// A single operator edit, queued by the panel and applied between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub key: ParamKey,
    pub value: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{key:?} must be finite")]
    NotFinite { key: ParamKey },

    #[error("{key:?} expects a {expected} value")]
    KindMismatch { key: ParamKey, expected: &'static str },

    #[error("invalid parameter file: {0}")]
    Parse(String),
}

/// Copy of every parameter, taken once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSnapshot {
    pub base_color: [f32; 3],
    pub opacity: f32,
    pub light_intensity: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            base_color: rgb_from_hex(DEFAULT_BASE_COLOR),
            opacity: DEFAULT_OPACITY,
            light_intensity: DEFAULT_LIGHT_INTENSITY,
        }
    }
}

/// Validated key/value store behind the operator panel
#[derive(Debug, Clone, Default)]
pub struct ParameterSurface {
    values: ParamSnapshot,
    revision: u64,
}

impl ParameterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object of initial values; every field goes through the setters
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ParamError> {
        let requested: ParamSnapshot =
            serde_json::from_str(json).map_err(|e| ParamError::Parse(e.to_string()))?;

        let mut surface = Self::new();
        surface.set(ParamKey::BaseColor, ParamValue::Color(requested.base_color))?;
        surface.set(ParamKey::Opacity, ParamValue::Scalar(requested.opacity))?;
        surface.set(ParamKey::LightIntensity, ParamValue::Scalar(requested.light_intensity))?;
        Ok(surface)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Failed to apply parameter file {:?}", path))
    }

    /// Number of accepted writes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::BaseColor => ParamValue::Color(self.values.base_color),
            ParamKey::Opacity => ParamValue::Scalar(self.values.opacity),
            ParamKey::LightIntensity => ParamValue::Scalar(self.values.light_intensity),
        }
    }

    /// Stores `value`, clamping finite out-of-range input; returns what was stored
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> std::result::Result<ParamValue, ParamError> {
        let (min, max) = key.range();

        let stored = match (key, value) {
            (ParamKey::BaseColor, ParamValue::Color(rgb)) => {
                if rgb.iter().any(|c| !c.is_finite()) {
                    return Err(ParamError::NotFinite { key });
                }
                let clamped = rgb.map(|c| c.clamp(min, max));
                if clamped != rgb {
                    warn!("{} {:?} clamped to {:?}", key.label(), rgb, clamped);
                }
                self.values.base_color = clamped;
                ParamValue::Color(clamped)
            }
            (ParamKey::Opacity | ParamKey::LightIntensity, ParamValue::Scalar(v)) => {
                if !v.is_finite() {
                    return Err(ParamError::NotFinite { key });
                }
                let clamped = v.clamp(min, max);
                if clamped != v {
                    warn!("{} {} clamped to {}", key.label(), v, clamped);
                }
                match key {
                    ParamKey::Opacity => self.values.opacity = clamped,
                    _ => self.values.light_intensity = clamped,
                }
                ParamValue::Scalar(clamped)
            }
            (ParamKey::BaseColor, _) => {
                return Err(ParamError::KindMismatch { key, expected: "color" });
            }
            (_, _) => {
                return Err(ParamError::KindMismatch { key, expected: "scalar" });
            }
        };

        self.revision += 1;
        Ok(stored)
    }

    pub fn apply(&mut self, change: ParamChange) -> std::result::Result<ParamValue, ParamError> {
        self.set(change.key, change.value)
    }

    pub fn set_opacity(&mut self, opacity: f32) -> std::result::Result<ParamValue, ParamError> {
        self.set(ParamKey::Opacity, ParamValue::Scalar(opacity))
    }

    pub fn set_base_color(&mut self, rgb: [f32; 3]) -> std::result::Result<ParamValue, ParamError> {
        self.set(ParamKey::BaseColor, ParamValue::Color(rgb))
    }

    pub fn set_light_intensity(&mut self, intensity: f32) -> std::result::Result<ParamValue, ParamError> {
        self.set(ParamKey::LightIntensity, ParamValue::Scalar(intensity))
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ParameterSurface::new();
        assert_eq!(params.get(ParamKey::Opacity), ParamValue::Scalar(DEFAULT_OPACITY));
        assert_eq!(params.revision(), 0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut params = ParameterSurface::new();
        assert_eq!(params.set_opacity(1.7), Ok(ParamValue::Scalar(1.0)));
        assert_eq!(params.set_opacity(-0.2), Ok(ParamValue::Scalar(0.0)));
        assert_eq!(params.set_light_intensity(50.0), Ok(ParamValue::Scalar(10.0)));
        assert_eq!(params.set_base_color([1.5, 0.5, -1.0]), Ok(ParamValue::Color([1.0, 0.5, 0.0])));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let mut params = ParameterSurface::new();
        let before = params.snapshot();
        assert_eq!(
            params.set_opacity(f32::NAN),
            Err(ParamError::NotFinite { key: ParamKey::Opacity })
        );
        assert_eq!(params.snapshot(), before);
        assert_eq!(params.revision(), 0);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut params = ParameterSurface::new();
        assert!(matches!(
            params.set(ParamKey::BaseColor, ParamValue::Scalar(0.5)),
            Err(ParamError::KindMismatch { expected: "color", .. })
        ));
        assert!(matches!(
            params.set(ParamKey::Opacity, ParamValue::Color([0.5; 3])),
            Err(ParamError::KindMismatch { expected: "scalar", .. })
        ));
    }

    #[test]
    fn test_json_partial_and_clamped() {
        let params = ParameterSurface::from_json_str(r#"{ "opacity": 3.0 }"#).unwrap();
        let snapshot = params.snapshot();
        assert_eq!(snapshot.opacity, 1.0);
        assert_eq!(snapshot.light_intensity, DEFAULT_LIGHT_INTENSITY);
    }

    #[test]
    fn test_json_garbage() {
        assert!(matches!(ParameterSurface::from_json_str("not json"), Err(ParamError::Parse(_))));
    }
}
