use crate::camera::CameraPose;

/// Camera movement and control abstraction
pub trait CameraController {
    /// Update camera state based on elapsed time
    fn update(&mut self, delta_time: f32);

    /// Current pose handed to the render delegate
    fn pose(&self) -> CameraPose;
}
