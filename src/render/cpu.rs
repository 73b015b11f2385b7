use crate::foundation::core::{OverlayBox, Rgba8};
use crate::foundation::error::OverprintResult;
use crate::foundation::raster::{PixelRect, Raster};
use crate::render::surface::DrawSurface;
use crate::text::font::{TextBrushRgba8, TextMeasure, TextShaper};

/// CPU raster surface: owns the output raster and borrows a shaper for the pinned font.
///
/// Rectangles are blended directly into the raster. Text is rasterized with `vello_cpu`
/// into premultiplied layers covering the visible part of each line, which are then blended
/// over the raster.
pub struct CpuSurface<'s> {
    raster: Raster,
    shaper: &'s mut TextShaper,
}

impl<'s> CpuSurface<'s> {
    /// Take ownership of `raster` for the duration of one overlay.
    pub fn new(raster: Raster, shaper: &'s mut TextShaper) -> Self {
        Self { raster, shaper }
    }

    /// Current pixels.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Finish and hand back the pixels.
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

impl DrawSurface for CpuSurface<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }

    fn measure_text(&mut self, text: &str, size_px: f32) -> OverprintResult<f32> {
        self.shaper.measure(text, size_px)
    }

    fn read_pixels(&self, rect: PixelRect) -> Vec<u8> {
        self.raster.read_pixels(rect)
    }

    fn fill_rect(&mut self, rect: OverlayBox, color: Rgba8) -> OverprintResult<()> {
        self.raster.blend_rect(rect, color);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size_px: f32,
        color: Rgba8,
    ) -> OverprintResult<()> {
        if text.is_empty() || color.a == 0 {
            return Ok(());
        }
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.shaper.layout_line(text, size_px, brush)?;

        // One pixel of slack on every side for antialiased edges and negative side bearings.
        let line_x0 = x.floor() as i64 - 1;
        let line_y0 = y.floor() as i64 - 1;
        let line_x1 = line_x0 + layout.width().max(0.0).ceil() as i64 + 3;
        let line_y1 = line_y0 + layout.height().max(0.0).ceil() as i64 + 3;

        // Only the part of the line that lands on the canvas is rasterized.
        let x0 = line_x0.max(0);
        let y0 = line_y0.max(0);
        let x1 = line_x1.min(i64::from(self.raster.width()));
        let y1 = line_y1.min(i64::from(self.raster.height()));

        let mut ty = y0;
        while ty < y1 {
            let th = (y1 - ty).min(TEXT_TILE);
            let mut tx = x0;
            while tx < x1 {
                let tw = (x1 - tx).min(TEXT_TILE);
                let layer = rasterize_line(
                    &layout,
                    self.shaper.font_data(),
                    f64::from(x) - tx as f64,
                    f64::from(y) - ty as f64,
                    tw as u16,
                    th as u16,
                );
                self.raster.blend_premul_layer(
                    layer.data_as_u8_slice(),
                    tw as u32,
                    th as u32,
                    tx,
                    ty,
                )?;
                tx += tw;
            }
            ty += th;
        }
        Ok(())
    }
}

/// Largest text layer edge; wider or taller visible spans are split into tiles.
const TEXT_TILE: i64 = 4096;

/// Rasterize `layout` into a `width x height` premultiplied layer, with the layout origin
/// at `(dx, dy)` in layer pixels.
fn rasterize_line(
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    dx: f64,
    dy: f64,
    width: u16,
    height: u16,
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((dx, dy)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut layer = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut layer);
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
