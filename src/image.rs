
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::slice::ChunksExact;

use log::{debug, warn};

use crate::color::Rgb;
use crate::error::RasterError;
use crate::ppm::{self, SaveOptions};

const CHANNELS: usize = 3;

/// An owned, row-major RGB image with 8 bits per channel
///
/// The three channels of a pixel are stored next to each other and rows follow
/// each other without padding, so the buffer always holds exactly
/// `3 * width * height` bytes. Cloning copies the whole buffer; two images
/// never share pixel memory.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Debug for RasterImage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Number of bytes needed for a `w` x `h` image
fn buffer_len(w: usize, h: usize) -> Result<usize, RasterError> {
    if w == 0 || h == 0 {
        return Err(RasterError::ZeroDimension { width: w, height: h });
    }
    w.checked_mul(h)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            warn!("Pixel buffer size for {}x{} image overflows", w, h);
            RasterError::AllocationFailed { width: w, height: h }
        })
}

/// Reserve `additional` bytes in `data`, reporting refusal instead of aborting
fn reserve(data: &mut Vec<u8>, additional: usize, w: usize, h: usize) -> Result<(), RasterError> {
    data.try_reserve_exact(additional)
        .map_err(|err| {
            warn!("Allocation of {}x{} image refused: {}", w, h, err);
            RasterError::AllocationFailed { width: w, height: h }
        })
}

impl RasterImage {
    /// Create a new image with every pixel set to black
    ///
    /// Fails with [`RasterError::ZeroDimension`] if either dimension is zero and
    /// with [`RasterError::AllocationFailed`] if the buffer cannot be obtained.
    pub fn create(w: usize, h: usize) -> Result<RasterImage, RasterError> {
        let len = buffer_len(w, h)?;
        let mut data = Vec::new();
        reserve(&mut data, len, w, h)?;
        data.resize(len, 0);

        debug!("Created {}x{} image ({} bytes)", w, h, len);

        Ok(RasterImage {
            width: w,
            height: h,
            data,
        })
    }

    /// Create a new image with every pixel set to `color`
    pub fn filled(w: usize, h: usize, color: Rgb) -> Result<RasterImage, RasterError> {
        let mut image = RasterImage::create(w, h)?;
        image.fill(color);
        Ok(image)
    }

    /// Take ownership of an existing row-major RGB buffer
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<RasterImage, RasterError> {
        let expected = buffer_len(w, h)?;
        if data.len() != expected {
            return Err(RasterError::BufferSizeMismatch { expected, actual: data.len() });
        }
        Ok(RasterImage {
            width: w,
            height: h,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the pixel bytes; the buffer length cannot change through it
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over rows, each `3 * width` bytes long
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(self.width * CHANNELS)
    }

    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data.chunks_exact(CHANNELS)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    fn pixel_index(&self, x: usize, y: usize) -> Result<usize, RasterError> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width * CHANNELS + x * CHANNELS)
    }

    pub fn get_red_pixel(&self, x: usize, y: usize) -> Result<u8, RasterError> {
        let index = self.pixel_index(x, y)?;
        Ok(self.data[index])
    }

    pub fn get_green_pixel(&self, x: usize, y: usize) -> Result<u8, RasterError> {
        let index = self.pixel_index(x, y)?;
        Ok(self.data[index + 1])
    }

    pub fn get_blue_pixel(&self, x: usize, y: usize) -> Result<u8, RasterError> {
        let index = self.pixel_index(x, y)?;
        Ok(self.data[index + 2])
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgb, RasterError> {
        let index = self.pixel_index(x, y)?;
        Ok(Rgb::new(
            self.data[index],
            self.data[index + 1],
            self.data[index + 2],
        ))
    }

    /// Overwrite the three channels of pixel `(x, y)`
    pub fn set_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) -> Result<(), RasterError> {
        let index = self.pixel_index(x, y)?;
        self.data[index] = r;
        self.data[index + 1] = g;
        self.data[index + 2] = b;
        Ok(())
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, color: Rgb) -> Result<(), RasterError> {
        self.set_pixel(x, y, color.r, color.g, color.b)
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb) {
        let rgb = color.to_array();
        for px in self.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgb);
        }
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<RasterImage, RasterError> {
        let mut data = Vec::new();
        reserve(&mut data, self.data.len(), self.width, self.height)?;
        data.extend_from_slice(&self.data);

        Ok(RasterImage {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Overwrite `self` with a deep copy of `source`
    ///
    /// The existing buffer is reused when it is large enough. If more memory is
    /// needed and cannot be obtained, `self` is left untouched.
    pub fn try_clone_from(&mut self, source: &RasterImage) -> Result<(), RasterError> {
        let additional = source.data.len().saturating_sub(self.data.len());
        reserve(&mut self.data, additional, source.width, source.height)?;

        self.data.clear();
        self.data.extend_from_slice(&source.data);
        self.width = source.width;
        self.height = source.height;
        Ok(())
    }

    /// Save as PPM using the default (legacy) encoding
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        self.save_image_with(path, &SaveOptions::default())
    }

    pub fn save_image_with<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<(), RasterError> {
        ppm::save(self, path.as_ref(), options)
    }
}
