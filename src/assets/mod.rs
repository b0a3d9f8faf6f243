//! Asynchronously populated scene members.

mod loader;
mod prepare;
mod slot;

pub use loader::{AssetLoader, AssetSource, ModelHierarchy, ModelMesh};
pub use prepare::{prepare_model, PrepareOptions};
pub use slot::{AssetSlot, SlotCompleter, SlotEvent, SlotState};

use thiserror::Error;

/// Why an asset slot ended up permanently empty
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("failed to read asset '{path}': {message}")]
    Source { path: String, message: String },

    #[error("asset '{0}' contains no meshes")]
    EmptyModel(String),

    #[error("mesh '{mesh}' in '{path}' has no positions")]
    MissingPositions { path: String, mesh: String },

    #[error("loader for '{0}' stopped before completing")]
    Abandoned(String),

    #[error("could not start loader for '{path}': {message}")]
    Spawn { path: String, message: String },
}
