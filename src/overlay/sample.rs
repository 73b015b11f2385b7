use crate::foundation::raster::{PixelRect, Raster};

/// Mean RGB of a pixel region, each channel in `0.0..=255.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AverageRgb {
    /// Mean red.
    pub r: f64,
    /// Mean green.
    pub g: f64,
    /// Mean blue.
    pub b: f64,
}

impl AverageRgb {
    /// Uniform gray.
    pub fn gray(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// Average color of `[x, x+w) x [y, y+h)`, clamped to the image; zero area samples 1x1.
pub fn sample_region(image: &Raster, x: i64, y: i64, w: i64, h: i64) -> AverageRgb {
    let rect = PixelRect::clamped(x, y, w, h, image.width(), image.height());
    average_rgb(&image.read_pixels(rect))
}

/// Average the RGB channels of straight RGBA8 bytes; alpha is ignored.
///
/// An empty slice averages to black.
pub fn average_rgb(rgba: &[u8]) -> AverageRgb {
    let mut sum = [0u64; 3];
    let mut n = 0u64;
    for px in rgba.chunks_exact(4) {
        sum[0] += u64::from(px[0]);
        sum[1] += u64::from(px[1]);
        sum[2] += u64::from(px[2]);
        n += 1;
    }
    if n == 0 {
        return AverageRgb::gray(0.0);
    }
    let n = n as f64;
    AverageRgb {
        r: sum[0] as f64 / n,
        g: sum[1] as f64 / n,
        b: sum[2] as f64 / n,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/sample.rs"]
mod tests;
