
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum RasterError {
    /// Width or height was zero
    ZeroDimension { width: usize, height: usize },
    /// The pixel buffer could not be allocated, or its size overflows `usize`
    AllocationFailed { width: usize, height: usize },
    /// A raw buffer did not hold exactly `3 * width * height` bytes
    BufferSizeMismatch { expected: usize, actual: usize },
    /// Pixel coordinates outside `[0, width) x [0, height)`
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
    Io(io::Error),
}

impl Display for RasterError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RasterError::ZeroDimension { width, height } => write!(f, "Image dimensions must be non-zero (got {}x{})", width, height),
            RasterError::AllocationFailed { width, height } => write!(f, "Unable to allocate pixel buffer for {}x{} image", width, height),
            RasterError::BufferSizeMismatch { expected, actual } => write!(f, "Pixel buffer holds {} bytes, expected {}", actual, expected),
            RasterError::OutOfBounds { x, y, width, height } => write!(f, "Pixel ({}, {}) is outside of {}x{} image", x, y, width, height),
            RasterError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for RasterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RasterError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RasterError {
    fn from(err: io::Error) -> RasterError {
        RasterError::Io(err)
    }
}
