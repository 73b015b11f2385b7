use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::foundation::error::OverprintResult;
use crate::foundation::raster::Raster;

/// Decode any format the `image` crate recognizes into a straight RGBA8 raster.
pub fn decode_raster(bytes: &[u8]) -> OverprintResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Raster::try_from(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_raster(path: &Path) -> OverprintResult<Raster> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let raster = decode_raster(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "image loaded"
    );
    Ok(raster)
}

/// Encode as PNG; the only output format, since it keeps the overlay lossless.
pub fn encode_png(raster: &Raster) -> OverprintResult<Vec<u8>> {
    let img = raster.to_rgba_image()?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode as PNG and write to `path`, creating parent directories as needed.
pub fn save_png(raster: &Raster, path: &Path) -> OverprintResult<()> {
    let bytes = encode_png(raster)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
