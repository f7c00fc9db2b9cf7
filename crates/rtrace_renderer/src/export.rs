//! Writing rendered images to disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::renderer::ImageBuffer;

/// Errors that can occur when saving an image.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match a {width}x{height} image")]
    BufferSize { width: u32, height: u32 },
}

/// Write an image as ASCII PPM (P3) with a maximum channel value of 255.
///
/// One pixel per line, in row-major order from the top-left corner.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    writer.flush()
}

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` or a missing extension writes ASCII PPM. Anything else is handed to
/// the `image` crate, which picks the encoder from the extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path)?;
        write_ppm(image, BufWriter::new(file))?;
    } else {
        let (width, height) = (image.width, image.height);
        let rgb = image::RgbImage::from_raw(width, height, image.to_rgb8())
            .ok_or(ExportError::BufferSize { width, height })?;
        rgb.save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
