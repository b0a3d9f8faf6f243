pub mod animation;
pub mod assets;
pub mod camera;
pub mod cli;
pub mod core;
pub mod frame;
pub mod frame_loop;
pub mod geometry;
pub mod loaders;
pub mod material;
pub mod math;
pub mod panel;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod shading;
pub mod traits;
pub mod types;

pub use frame_loop::{FrameLoop, FrameReport, LoopState};
pub use scene::{AnimatedObject, SceneRegistry};
pub use scenes::SmokeGarden;
