pub mod camera;
pub mod renderer;
pub mod scene;

pub use camera::*;
pub use renderer::*;
pub use scene::*;
