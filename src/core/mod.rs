pub mod clock;
pub mod input;

pub use clock::Clock;
pub use input::PointerState;
