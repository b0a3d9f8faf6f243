use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use noise_scene::assets::{AssetLoader, AssetSlot};
use noise_scene::camera::OrbitCamera;
use noise_scene::cli::Cli;
use noise_scene::core::{Clock, PointerState};
use noise_scene::frame_loop::FrameLoop;
use noise_scene::loaders::GltfSource;
use noise_scene::panel::PanelStats;
use noise_scene::params::ParameterSurface;
use noise_scene::renderer::SceneRenderer;
use noise_scene::scenes::{asset_orbit, SmokeGarden};
use noise_scene::traits::{CameraController, SceneProvider};

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;
const CAMERA_DISTANCE: f32 = 12.0;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    frame_loop: FrameLoop,
    params: ParameterSurface,
    camera: OrbitCamera,
    pointer: PointerState,
    clock: Clock,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, params: ParameterSurface) -> Self {
        let mut scene = SmokeGarden.build();
        let slot = match &cli.model {
            Some(path) => AssetLoader::new(GltfSource).load(path),
            None => AssetSlot::empty("orbit"),
        };
        scene.add_asset(slot, asset_orbit());

        Self {
            cli,
            window: None,
            renderer: None,
            frame_loop: FrameLoop::new(scene),
            params,
            camera: OrbitCamera::new(Vec3::new(0.0, 1.0, 0.0), CAMERA_DISTANCE),
            pointer: PointerState::new(),
            clock: Clock::new(),
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        self.update_fps(delta);

        self.camera.process_pointer(&mut self.pointer);
        self.camera.update(delta);
        let pose = self.camera.pose();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let report = self
            .frame_loop
            .tick(self.clock.now_ms(), &self.params, &pose, renderer);
        if let Err(e) = &report.render {
            error!("Render error: {:#}", e);
        }

        for change in renderer.take_param_changes() {
            if let Err(e) = self.params.apply(change) {
                warn!("Rejected panel edit: {}", e);
            }
        }

        renderer.set_panel_state(
            self.params.snapshot(),
            PanelStats {
                fps: self.fps,
                time: report.info.time,
                frame: report.info.number,
                objects: report.drawn_objects,
                pending_assets: report.pending_slots,
            },
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Noise Scene")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SceneRenderer::new(window.clone(), self.cli.vsync, !self.cli.no_ui)) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let Some(renderer) = &mut self.renderer {
            if renderer.handle_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => self.pointer.process_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => ParameterSurface::from_json_file(path)?,
        None => ParameterSurface::new(),
    };

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(cli, params);

    info!("Noise Scene - drag to orbit, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app).context("Event loop failed")?;

    Ok(())
}
