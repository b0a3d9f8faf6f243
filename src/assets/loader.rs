use std::sync::Arc;
use std::thread;

use glam::Mat4;
use log::{debug, info};

use super::prepare::{prepare_model, PrepareOptions};
use super::slot::AssetSlot;
use super::AssetError;
use crate::material::Material;

/// Raw model as produced by an asset source, before preparation
#[derive(Debug, Clone)]
pub struct ModelHierarchy {
    pub name: String,
    pub meshes: Vec<ModelMesh>,
}

/// One mesh primitive with its world transform inside the model.
///
/// Primitives of the same source material share one `Arc`, as decoders hand them out.
#[derive(Debug, Clone)]
pub struct ModelMesh {
    pub name: String,
    pub world: Mat4,
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub indices: Option<Vec<u32>>,
    pub material: Arc<Material>,
}

/// Opaque producer of model hierarchies addressed by path
pub trait AssetSource: Send + Sync + 'static {
    fn fetch(&self, path: &str) -> Result<ModelHierarchy, AssetError>;
}

/// Starts loads on a worker thread and returns slots that fill in later
pub struct AssetLoader<S: AssetSource> {
    source: Arc<S>,
    options: PrepareOptions,
}

impl<S: AssetSource> AssetLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            options: PrepareOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PrepareOptions) -> Self {
        self.options = options;
        self
    }

    /// Begins loading `path`; the returned slot is `Loading` until polled after completion.
    ///
    /// There is no cancellation and no retry.
    pub fn load(&self, path: &str) -> AssetSlot {
        let (slot, completer) = AssetSlot::pending(path);
        let source = Arc::clone(&self.source);
        let options = self.options;
        let owned_path = path.to_string();

        info!("Loading asset '{}'", path);
        let spawned = thread::Builder::new()
            .name(format!("asset-{}", path))
            .spawn(move || {
                let result = source
                    .fetch(&owned_path)
                    .and_then(|model| prepare_model(model, &options));
                debug!("Asset '{}' finished on loader thread", owned_path);
                completer.complete(result);
            });

        match spawned {
            Ok(_) => slot,
            Err(e) => AssetSlot::failed(
                path,
                AssetError::Spawn {
                    path: path.to_string(),
                    message: e.to_string(),
                },
            ),
        }
    }
}
