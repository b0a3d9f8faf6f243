use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::animation::{AnimationRule, LightRule};
use crate::assets::AssetSlot;
use crate::geometry::MeshGeometry;
use crate::material::Material;
use crate::shading::ShaderUniformSet;

/// Position, Euler rotation (XYZ, radians) and scale, each animated independently
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// One drawable piece of an object
#[derive(Debug, Clone)]
pub struct Surface {
    pub geometry: Arc<MeshGeometry>,
    pub material: Material,
    /// Placement inside the object (node transform for loaded models)
    pub local: Mat4,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Surface {
    pub fn new(geometry: Arc<MeshGeometry>, material: Material) -> Self {
        Self {
            geometry,
            material,
            local: Mat4::IDENTITY,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// Which pipeline draws an object, fixed when the object is built
#[derive(Debug, Clone, PartialEq)]
pub enum Shading {
    Standard,
    Smoke(ShaderUniformSet),
}

#[derive(Debug, Clone)]
pub struct AnimatedObject {
    pub name: String,
    pub transform: Transform,
    pub surfaces: Vec<Surface>,
    pub shading: Shading,
}

impl AnimatedObject {
    pub fn new(name: impl Into<String>, geometry: MeshGeometry, material: Material) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            surfaces: vec![Surface::new(Arc::new(geometry), material)],
            shading: Shading::Standard,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn uniforms(&self) -> Option<&ShaderUniformSet> {
        match &self.shading {
            Shading::Smoke(uniforms) => Some(uniforms),
            Shading::Standard => None,
        }
    }

    pub fn uniforms_mut(&mut self) -> Option<&mut ShaderUniformSet> {
        match &mut self.shading {
            Shading::Smoke(uniforms) => Some(uniforms),
            Shading::Standard => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub name: String,
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

impl PointLight {
    pub fn new(name: impl Into<String>, position: Vec3, color: [f32; 3], intensity: f32) -> Self {
        Self {
            name: name.into(),
            position,
            color,
            intensity,
            range: 30.0,
        }
    }
}

#[derive(Debug)]
pub struct SceneEntry {
    pub object: AnimatedObject,
    pub rule: AnimationRule,
}

#[derive(Debug)]
pub struct LightEntry {
    pub light: PointLight,
    pub rule: LightRule,
}

/// An asset slot together with the rule applied once its object is ready
#[derive(Debug)]
pub struct AssetEntry {
    pub slot: AssetSlot,
    pub rule: AnimationRule,
}

/// Everything the frame loop animates and the renderer draws
#[derive(Debug, Default)]
pub struct SceneRegistry {
    entries: Vec<SceneEntry>,
    lights: Vec<LightEntry>,
    assets: Vec<AssetEntry>,
    pub clear_color: [f32; 3],
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: AnimatedObject, rule: AnimationRule) -> usize {
        self.entries.push(SceneEntry { object, rule });
        self.entries.len() - 1
    }

    pub fn add_light(&mut self, light: PointLight, rule: LightRule) -> usize {
        self.lights.push(LightEntry { light, rule });
        self.lights.len() - 1
    }

    pub fn add_asset(&mut self, slot: AssetSlot, rule: AnimationRule) -> usize {
        self.assets.push(AssetEntry { slot, rule });
        self.assets.len() - 1
    }

    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [SceneEntry] {
        &mut self.entries
    }

    pub fn lights(&self) -> &[LightEntry] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut [LightEntry] {
        &mut self.lights
    }

    pub fn assets(&self) -> &[AssetEntry] {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut [AssetEntry] {
        &mut self.assets
    }

    /// Looks up a built or loaded object by name
    pub fn object(&self, name: &str) -> Option<&AnimatedObject> {
        self.drawables().find(|object| object.name == name)
    }

    pub fn light(&self, name: &str) -> Option<&PointLight> {
        self.lights.iter().map(|entry| &entry.light).find(|light| light.name == name)
    }

    /// Built objects followed by every asset whose slot is ready
    pub fn drawables(&self) -> impl Iterator<Item = &AnimatedObject> {
        self.entries
            .iter()
            .map(|entry| &entry.object)
            .chain(self.assets.iter().filter_map(|entry| entry.slot.object()))
    }

    /// Slots that have not produced an object (yet or ever)
    pub fn pending_assets(&self) -> usize {
        self.assets.iter().filter(|entry| entry.slot.object().is_none()).count()
    }
}
