use std::sync::Arc;

use glam::{Mat4, Vec3};

use super::loader::ModelHierarchy;
use super::AssetError;
use crate::geometry::MeshGeometry;
use crate::scene::{AnimatedObject, Shading, Surface, Transform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrepareOptions {
    /// Largest extent of the model after normalization; `None` keeps source units
    pub target_size: Option<f32>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            target_size: Some(3.0),
        }
    }
}

/// One-time post-processing of a freshly loaded model.
///
/// Every mesh gets its own copy of its material, normals where the source had none,
/// color spaces on its textures, and is marked as casting and receiving shadows.
pub fn prepare_model(model: ModelHierarchy, options: &PrepareOptions) -> Result<AnimatedObject, AssetError> {
    if model.meshes.is_empty() {
        return Err(AssetError::EmptyModel(model.name));
    }

    let mut surfaces = Vec::with_capacity(model.meshes.len());
    for mesh in model.meshes {
        if mesh.positions.is_empty() {
            return Err(AssetError::MissingPositions {
                path: model.name.clone(),
                mesh: mesh.name,
            });
        }

        let indices = mesh
            .indices
            .unwrap_or_else(|| (0..mesh.positions.len() as u32).collect());
        let geometry = MeshGeometry::from_parts(mesh.positions, mesh.normals, indices);

        let mut material = (*mesh.material).clone();
        material.tag_color_spaces();

        surfaces.push(Surface {
            geometry: Arc::new(geometry),
            material,
            local: mesh.world,
            cast_shadow: true,
            receive_shadow: true,
        });
    }

    if let Some(target) = options.target_size {
        normalize(&mut surfaces, target);
    }

    Ok(AnimatedObject {
        name: model.name,
        transform: Transform::default(),
        surfaces,
        shading: Shading::Standard,
    })
}

/// Centers the model on the origin and scales its largest extent to `target`
fn normalize(surfaces: &mut [Surface], target: f32) {
    let (min, max) = surfaces.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), surface| {
            let (lo, hi) = surface.geometry.bounds();
            (0..8).fold((min, max), |(min, max), corner| {
                let p = Vec3::select(
                    glam::BVec3::new(corner & 1 != 0, corner & 2 != 0, corner & 4 != 0),
                    hi,
                    lo,
                );
                let p = surface.local.transform_point3(p);
                (min.min(p), max.max(p))
            })
        },
    );

    let extent = (max - min).max_element();
    if !extent.is_finite() || extent <= f32::EPSILON {
        return;
    }

    let fit = Mat4::from_scale(Vec3::splat(target / extent)) * Mat4::from_translation(-(min + max) * 0.5);
    for surface in surfaces {
        surface.local = fit * surface.local;
    }
}
