use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::assets::{AssetError, AssetSource, ModelHierarchy, ModelMesh};
use crate::material::{Material, TextureRef, TextureRole};

/// Reads glTF / GLB files from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct GltfSource;

impl AssetSource for GltfSource {
    fn fetch(&self, path: &str) -> std::result::Result<ModelHierarchy, AssetError> {
        load_gltf_file(path).map_err(|e| AssetError::Source {
            path: path.to_string(),
            message: format!("{:#}", e),
        })
    }
}

/// Loads a glTF file into a flat list of meshes with world transforms
pub fn load_gltf_file(path: impl AsRef<Path>) -> Result<ModelHierarchy> {
    let path = path.as_ref();

    let (gltf, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    info!(
        "glTF {:?}: {} scenes, {} nodes, {} meshes, {} materials",
        path,
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count(),
        gltf.materials().count()
    );

    let materials: Vec<Arc<Material>> = gltf.materials().map(|m| Arc::new(convert_material(&m))).collect();
    let fallback = Arc::new(Material::default());

    let mut meshes = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &glam::Mat4::IDENTITY, &materials, &fallback, &mut meshes)?;
        }
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ModelHierarchy { name, meshes })
}

fn convert_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let mut textures = Vec::new();

    if let Some(info) = pbr.base_color_texture() {
        textures.push(TextureRef::untagged(TextureRole::BaseColor, info.texture().source().index()));
    }
    if let Some(info) = pbr.metallic_roughness_texture() {
        textures.push(TextureRef::untagged(
            TextureRole::MetallicRoughness,
            info.texture().source().index(),
        ));
    }
    if let Some(normal) = material.normal_texture() {
        textures.push(TextureRef::untagged(TextureRole::Normal, normal.texture().source().index()));
    }
    if let Some(occlusion) = material.occlusion_texture() {
        textures.push(TextureRef::untagged(TextureRole::Occlusion, occlusion.texture().source().index()));
    }
    if let Some(info) = material.emissive_texture() {
        textures.push(TextureRef::untagged(TextureRole::Emissive, info.texture().source().index()));
    }

    Material {
        name: material.name().map(str::to_string),
        base_color: pbr.base_color_factor(),
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        textures,
    }
}

/// Recursively walks the node tree, accumulating transforms
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &glam::Mat4,
    materials: &[Arc<Material>],
    fallback: &Arc<Material>,
    meshes: &mut Vec<ModelMesh>,
) -> Result<()> {
    let local_transform = glam::Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        let mesh_name = mesh.name().unwrap_or("unnamed").to_string();
        debug!("  mesh {:?}: {} primitives", mesh_name, mesh.primitives().count());

        for primitive in mesh.primitives() {
            if !is_triangle_list(primitive.mode()) {
                warn!(
                    "  skipping primitive {} of mesh {:?}: {:?} is not a triangle list",
                    primitive.index(),
                    mesh_name,
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .with_context(|| format!("Mesh {:?} has a primitive without positions", mesh_name))?
                .collect();
            let normals = reader.read_normals().map(|normals| normals.collect());
            let indices = reader.read_indices().map(|indices| indices.into_u32().collect());

            let material = primitive
                .material()
                .index()
                .and_then(|i| materials.get(i))
                .unwrap_or(fallback);

            meshes.push(ModelMesh {
                name: mesh_name.clone(),
                world: global_transform,
                positions,
                normals,
                indices,
                material: Arc::clone(material),
            });
        }
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, materials, fallback, meshes)?;
    }

    Ok(())
}

/// Only triangle lists can go straight into the indexed triangle pipelines
fn is_triangle_list(mode: gltf::mesh::Mode) -> bool {
    matches!(mode, gltf::mesh::Mode::Triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_triangle_lists_are_loaded() {
        use gltf::mesh::Mode;

        assert!(is_triangle_list(Mode::Triangles));
        for mode in [Mode::Points, Mode::Lines, Mode::LineLoop, Mode::LineStrip, Mode::TriangleStrip, Mode::TriangleFan] {
            assert!(!is_triangle_list(mode), "{:?} should be skipped", mode);
        }
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = GltfSource.fetch("definitely/not/here.gltf").unwrap_err();
        match err {
            AssetError::Source { path, message } => {
                assert_eq!(path, "definitely/not/here.gltf");
                assert!(message.contains("Failed to load glTF file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
