use crate::scene::SceneRegistry;

/// Scene construction abstraction
pub trait SceneProvider {
    /// Build every object, light and asset slot of this scene
    fn build(&self) -> SceneRegistry;

    /// Get scene name for debugging
    fn name(&self) -> &str {
        "Scene"
    }
}
