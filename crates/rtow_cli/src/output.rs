//! Image output: plain-text PPM or any format the `image` crate infers
//! from the file extension.

use anyhow::{Context, Result};
use rtow_renderer::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the image as a P3 PPM stream, rows top to bottom.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.rgb(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}

fn is_ppm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ppm"))
        .unwrap_or(false)
}

/// Save the image to `path`. `.ppm` files are written as text; every
/// other extension goes through `image` (PNG, JPEG, ...).
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    if is_ppm(path) {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_ppm(image, BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb_bytes())
            .context("pixel buffer does not match image dimensions")?;
        rgb.save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
