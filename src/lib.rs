mod color;
mod error;
mod image;
pub mod ppm;

pub use color::Rgb;
pub use error::RasterError;
pub use image::RasterImage;
pub use ppm::{PpmEncoding, SaveOptions};
