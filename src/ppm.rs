//! PPM output
//!
//! Three layouts are supported, all sharing the text header
//! `<tag>\n<width> <height>\n255\n`:
//!
//! - [`PpmEncoding::Legacy`]: tag `P6` followed by decimal text rows. Each pixel
//!   is written as `"<r> <g> <b> "` and each row ends with `\n`. The tag
//!   announces binary data, so strict readers will misparse these files; the
//!   layout is kept for compatibility with existing output.
//! - [`PpmEncoding::Ascii`]: the same rows under the plain-text tag `P3`.
//! - [`PpmEncoding::Binary`]: tag `P6` followed by the raw pixel bytes.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use serde::{Serialize, Deserialize};

use crate::error::RasterError;
use crate::image::RasterImage;

const MAX_VALUE: u8 = 255;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PpmEncoding {
    Legacy,
    Ascii,
    Binary,
}

impl Default for PpmEncoding {
    fn default() -> PpmEncoding {
        PpmEncoding::Legacy
    }
}

impl PpmEncoding {
    /// Magic number written on the first line
    pub fn tag(&self) -> &'static str {
        match self {
            PpmEncoding::Legacy | PpmEncoding::Binary => "P6",
            PpmEncoding::Ascii => "P3",
        }
    }
}

impl Display for PpmEncoding {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PpmEncoding::Legacy => write!(f, "legacy"),
            PpmEncoding::Ascii => write!(f, "ascii"),
            PpmEncoding::Binary => write!(f, "binary"),
        }
    }
}

/// Options for [`RasterImage::save_image_with`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    pub encoding: PpmEncoding,
}

impl SaveOptions {
    pub fn new(encoding: PpmEncoding) -> SaveOptions {
        SaveOptions { encoding }
    }
}

fn write_header<W: Write>(writer: &mut W, image: &RasterImage, encoding: PpmEncoding) -> Result<(), RasterError> {
    writeln!(writer, "{}", encoding.tag())?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{}", MAX_VALUE)?;
    Ok(())
}

fn write_decimal_rows<W: Write>(writer: &mut W, image: &RasterImage) -> Result<(), RasterError> {
    for row in image.rows() {
        for px in row.chunks_exact(3) {
            write!(writer, "{} {} {} ", px[0], px[1], px[2])?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Encode `image` into `writer`
pub fn write_ppm<W: Write>(writer: &mut W, image: &RasterImage, encoding: PpmEncoding) -> Result<(), RasterError> {
    write_header(writer, image, encoding)?;
    match encoding {
        PpmEncoding::Legacy | PpmEncoding::Ascii => write_decimal_rows(writer, image)?,
        PpmEncoding::Binary => writer.write_all(image.as_bytes())?,
    }
    Ok(())
}

/// Create or truncate `path` and write `image` to it
pub(crate) fn save(image: &RasterImage, path: &Path, options: &SaveOptions) -> Result<(), RasterError> {
    let result = File::create(path)
        .map_err(RasterError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write_ppm(&mut writer, image, options.encoding)?;
            writer.flush()?;
            Ok(())
        });

    match &result {
        Ok(()) => debug!("Saved {}x{} image to \"{}\" ({} encoding)", image.width(), image.height(), path.display(), options.encoding),
        Err(err) => warn!("Unable to save image to \"{}\": {}", path.display(), err),
    }

    result
}
