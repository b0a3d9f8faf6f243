use crate::camera::CameraPose;
use crate::scene::SceneRegistry;

/// Draws one frame of the scene; called exactly once per frame loop iteration,
/// after every transform and uniform for that frame has been written
pub trait RenderDelegate {
    fn render(&mut self, scene: &SceneRegistry, camera: &CameraPose) -> anyhow::Result<()>;
}

impl<R: RenderDelegate + ?Sized> RenderDelegate for &mut R {
    fn render(&mut self, scene: &SceneRegistry, camera: &CameraPose) -> anyhow::Result<()> {
        (**self).render(scene, camera)
    }
}
