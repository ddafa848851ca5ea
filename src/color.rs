
use serde::{Serialize, Deserialize};

/// A single 8-bit RGB pixel
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Construct a new Rgb struct
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// All channels set to 0
    pub const fn black() -> Rgb {
        Rgb::new(0, 0, 0)
    }

    pub const fn white() -> Rgb {
        Rgb::new(255, 255, 255)
    }

    /// Channels in storage order
    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from(rgb: (u8, u8, u8)) -> Rgb {
        Rgb::new(rgb.0, rgb.1, rgb.2)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(rgb: Rgb) -> (u8, u8, u8) {
        (rgb.r, rgb.g, rgb.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Rgb {
        Rgb::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> [u8; 3] {
        rgb.to_array()
    }
}
