mod color;
pub mod noise;

pub use color::{hex_from_rgb, hsv_to_rgb, rgb_from_hex};
pub use noise::{gradient_noise3, value_noise2};
