//! Per-refresh update of the whole scene.
//!
//! One `tick` per display refresh: advance the time base, snapshot the parameters,
//! run every rule, poll the asset slots and hand the result to the render delegate.
//! Nothing here blocks; a slot that is still loading is simply skipped.

use log::info;

use crate::assets::SlotEvent;
use crate::camera::CameraPose;
use crate::frame::{FrameInfo, TimeBase};
use crate::params::{ParamSnapshot, ParameterSurface};
use crate::scene::{AnimatedObject, SceneRegistry};
use crate::traits::RenderDelegate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame has run yet
    Idle,
    Running,
}

/// What one tick did
#[derive(Debug)]
pub struct FrameReport {
    pub info: FrameInfo,
    /// Objects handed to the delegate (built objects plus ready assets)
    pub drawn_objects: usize,
    /// Asset slots without an object this frame
    pub pending_slots: usize,
    pub render: anyhow::Result<()>,
}

pub struct FrameLoop {
    state: LoopState,
    time: TimeBase,
    scene: SceneRegistry,
}

impl FrameLoop {
    pub fn new(scene: SceneRegistry) -> Self {
        Self {
            state: LoopState::Idle,
            time: TimeBase::new(),
            scene,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn time(&self) -> &TimeBase {
        &self.time
    }

    pub fn scene(&self) -> &SceneRegistry {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scene
    }

    /// Runs one frame at host clock `clock_ms` and submits it to `delegate` exactly once
    pub fn tick<R: RenderDelegate + ?Sized>(
        &mut self,
        clock_ms: f64,
        params: &ParameterSurface,
        camera: &CameraPose,
        delegate: &mut R,
    ) -> FrameReport {
        if self.state == LoopState::Idle {
            info!(
                "Frame loop running ({} objects, {} lights, {} asset slots)",
                self.scene.entries().len(),
                self.scene.lights().len(),
                self.scene.assets().len()
            );
            self.state = LoopState::Running;
        }

        let info = self.time.advance(clock_ms);
        let snapshot = params.snapshot();
        let t = info.time;

        for entry in self.scene.entries_mut() {
            entry.rule.apply(&mut entry.object.transform, t);
            write_uniforms(&mut entry.object, t, &snapshot);
        }

        for entry in self.scene.lights_mut() {
            entry.rule.apply(&mut entry.light, t, snapshot.light_intensity);
        }

        // Slot state is re-read every frame; a load may finish between any two ticks.
        for entry in self.scene.assets_mut() {
            if entry.slot.poll() == SlotEvent::BecameReady {
                info!("Asset '{}' joins the scene at t={:.2}", entry.slot.path(), t);
            }
            if let Some(object) = entry.slot.object_mut() {
                entry.rule.apply(&mut object.transform, t);
                write_uniforms(object, t, &snapshot);
            }
        }

        let drawn_objects = self.scene.drawables().count();
        let pending_slots = self.scene.pending_assets();
        let render = delegate.render(&self.scene, camera);

        FrameReport {
            info,
            drawn_objects,
            pending_slots,
            render,
        }
    }
}

fn write_uniforms(object: &mut AnimatedObject, t: f32, snapshot: &ParamSnapshot) {
    if let Some(uniforms) = object.uniforms_mut() {
        uniforms.set_time(t);
        uniforms.set_base_color(snapshot.base_color);
        uniforms.set_opacity(snapshot.opacity);
    }
}
