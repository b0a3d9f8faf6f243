use glam::{Mat4, Vec3};

use crate::core::PointerState;
use crate::traits::CameraController;
use crate::types::CameraUniform;

pub const ORBIT_SENSITIVITY: f32 = 0.005;
pub const ZOOM_STEP: f32 = 0.9;
pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 60.0;
const PITCH_LIMIT: f32 = 1.5;

/// Where the camera is and what it looks at for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraPose {
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), self.near, self.far);
        proj * view
    }

    pub fn to_uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj(aspect).to_cols_array_2d(),
            eye: self.eye.to_array(),
            _pad: 0.0,
        }
    }
}

/// Orbit camera around a fixed target, driven by pointer drag and scroll
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pending_orbit: (f32, f32),
    pending_zoom: f32,
}

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            yaw: 0.0,
            pitch: 0.45,
            fov_y: 75f32.to_radians(),
            pending_orbit: (0.0, 0.0),
            pending_zoom: 0.0,
        }
    }

    /// Direction from the target towards the eye
    pub fn offset_dir(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.offset_dir() * self.distance
    }

    /// Queue the pointer's drag and scroll, then clear them
    pub fn process_pointer(&mut self, pointer: &mut PointerState) {
        let (dx, dy) = pointer.drag_delta();
        self.pending_orbit.0 += dx;
        self.pending_orbit.1 += dy;
        self.pending_zoom += pointer.scroll_delta();
        pointer.reset_deltas();
    }
}

impl CameraController for OrbitCamera {
    fn update(&mut self, _delta_time: f32) {
        let (dx, dy) = std::mem::take(&mut self.pending_orbit);
        self.yaw -= dx * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + dy * ORBIT_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let zoom = std::mem::take(&mut self.pending_zoom);
        if zoom != 0.0 {
            self.distance = (self.distance * ZOOM_STEP.powf(zoom)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            fov_y: self.fov_y,
            near: 0.1,
            far: 1000.0,
        }
    }
}
