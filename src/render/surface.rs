use crate::foundation::core::{OverlayBox, Rgba8};
use crate::foundation::error::OverprintResult;
use crate::foundation::raster::PixelRect;

/// Drawing adapter the overlay engine is written against.
///
/// Every runtime that shows or produces an overlay implements this trait; all geometry,
/// wrapping and color decisions stay in the engine so the implementations cannot drift.
pub trait DrawSurface {
    /// Canvas size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Advance width of `text` at `size_px` with the surface's pinned font.
    fn measure_text(&mut self, text: &str, size_px: f32) -> OverprintResult<f32>;

    /// Straight RGBA8 bytes of `rect`, row-major. `rect` is already clamped to the canvas.
    fn read_pixels(&self, rect: PixelRect) -> Vec<u8>;

    /// Source-over a filled rectangle.
    fn fill_rect(&mut self, rect: OverlayBox, color: Rgba8) -> OverprintResult<()>;

    /// Draw one line of text with its top-left corner at `(x, y)`.
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size_px: f32,
        color: Rgba8,
    ) -> OverprintResult<()>;
}
