use crate::foundation::core::{OverlayBox, Rgba8};
use crate::foundation::error::{OverprintError, OverprintResult};
use crate::foundation::math::straight_over_px;

/// Owned raster image: straight-alpha RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Rectangle clamped to a raster's bounds (`[x0, x1) x [y0, y1)`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Inclusive left edge.
    pub x0: u32,
    /// Inclusive top edge.
    pub y0: u32,
    /// Exclusive right edge.
    pub x1: u32,
    /// Exclusive bottom edge.
    pub y1: u32,
}

impl PixelRect {
    /// Clamp the signed rectangle `(x, y, w, h)` to a `width x height` canvas.
    ///
    /// Zero-area input is widened to 1x1 at its (clamped) origin so callers always get at
    /// least one pixel back from a non-empty canvas.
    pub fn clamped(x: i64, y: i64, w: i64, h: i64, width: u32, height: u32) -> Self {
        let (cw, ch) = (i64::from(width), i64::from(height));
        let w = w.max(1);
        let h = h.max(1);
        let mut x0 = x.clamp(0, cw);
        let mut y0 = y.clamp(0, ch);
        let mut x1 = x.saturating_add(w).clamp(0, cw);
        let mut y1 = y.saturating_add(h).clamp(0, ch);
        if x1 <= x0 {
            x0 = x0.min(cw - 1).max(0);
            x1 = (x0 + 1).min(cw);
        }
        if y1 <= y0 {
            y0 = y0.min(ch - 1).max(0);
            y1 = (y0 + 1).min(ch);
        }
        Self {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        }
    }

    /// Pixel count.
    pub fn area(self) -> u64 {
        u64::from(self.x1 - self.x0) * u64::from(self.y1 - self.y0)
    }
}

impl Raster {
    /// Wrap straight RGBA8 bytes; rejects zero-area images and size mismatches.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> OverprintResult<Self> {
        if width == 0 || height == 0 {
            return Err(OverprintError::invalid_image(format!(
                "image must have non-zero width and height, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(OverprintError::invalid_image(format!(
                "rgba8 buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniformly filled raster.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> OverprintResult<Self> {
        let px = [color.r, color.g, color.b, color.a];
        let n = (width as usize).saturating_mul(height as usize);
        Self::from_rgba8(width, height, px.repeat(n))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw straight RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume into raw straight RGBA8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`; `None` outside bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy out the straight RGBA8 bytes of `rect`, row by row.
    pub fn read_pixels(&self, rect: PixelRect) -> Vec<u8> {
        let row_bytes = (rect.x1 - rect.x0) as usize * 4;
        let mut out = Vec::with_capacity(rect.area() as usize * 4);
        for y in rect.y0..rect.y1 {
            let start = self.index(rect.x0, y);
            out.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        out
    }

    /// Source-over blend `color` across `rect`, clipped to the raster.
    pub fn blend_rect(&mut self, rect: OverlayBox, color: Rgba8) {
        let src = color.to_premul();
        if src[3] == 0 || rect.width == 0 || rect.height == 0 {
            return;
        }
        let x1 = rect.right().min(u64::from(self.width)) as u32;
        let y1 = rect.bottom().min(u64::from(self.height)) as u32;
        for y in rect.y.min(self.height)..y1 {
            for x in rect.x.min(self.width)..x1 {
                self.blend_px(x, y, src);
            }
        }
    }

    /// Source-over a premultiplied RGBA8 layer with its top-left corner at `(ox, oy)`.
    ///
    /// Pixels falling outside the raster are dropped.
    pub fn blend_premul_layer(
        &mut self,
        layer: &[u8],
        layer_width: u32,
        layer_height: u32,
        ox: i64,
        oy: i64,
    ) -> OverprintResult<()> {
        let expected = (layer_width as usize)
            .saturating_mul(layer_height as usize)
            .saturating_mul(4);
        if layer.len() != expected {
            return Err(OverprintError::invalid_image(
                "layer byte length does not match its dimensions",
            ));
        }
        for ly in 0..layer_height {
            let y = oy + i64::from(ly);
            if y < 0 || y >= i64::from(self.height) {
                continue;
            }
            for lx in 0..layer_width {
                let x = ox + i64::from(lx);
                if x < 0 || x >= i64::from(self.width) {
                    continue;
                }
                let li = ((ly as usize) * (layer_width as usize) + (lx as usize)) * 4;
                let src = [layer[li], layer[li + 1], layer[li + 2], layer[li + 3]];
                self.blend_px(x as u32, y as u32, src);
            }
        }
        Ok(())
    }

    /// Convert into an `image` crate buffer.
    pub fn to_rgba_image(&self) -> OverprintResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| OverprintError::invalid_image("raster buffer length mismatch"))
    }

    fn blend_px(&mut self, x: u32, y: u32, src_premul: [u8; 4]) {
        let i = self.index(x, y);
        let d = &mut self.data[i..i + 4];
        let out = straight_over_px([d[0], d[1], d[2], d[3]], src_premul);
        d.copy_from_slice(&out);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

impl TryFrom<image::RgbaImage> for Raster {
    type Error = OverprintError;

    fn try_from(img: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Raster::from_rgba8(width, height, img.into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/raster.rs"]
mod tests;
