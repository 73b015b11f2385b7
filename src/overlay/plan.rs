use crate::foundation::core::{Anchor, OverlayBox, Statement};
use crate::foundation::error::{OverprintError, OverprintResult};
use crate::foundation::raster::PixelRect;
use crate::overlay::contrast::{
    ColorPair, contrast_ratio, relative_luminance, scheme_for_luminance,
};
use crate::overlay::metrics::OverlayMetrics;
use crate::overlay::position::resolve;
use crate::overlay::sample::{AverageRgb, average_rgb};
use crate::render::surface::DrawSurface;
use crate::text::font::TextMeasure;
use crate::text::wrap::{LineSet, wrap};

/// Every decision made for one overlay request, in the order it was made.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayPlan {
    /// Canvas width the plan was computed for.
    pub canvas_width: u32,
    /// Canvas height the plan was computed for.
    pub canvas_height: u32,
    /// Requested corner.
    pub anchor: Anchor,
    /// Size formulas evaluated for the canvas.
    pub metrics: OverlayMetrics,
    /// Wrapped statement.
    pub lines: LineSet,
    /// Final, clamped box (backing rectangle).
    pub bbox: OverlayBox,
    /// `true` when the box is larger than the canvas and spills past it.
    pub overflows: bool,
    /// Mean color under `bbox`, sampled before anything is drawn.
    pub background: AverageRgb,
    /// Relative luminance of `background`.
    pub luminance: f64,
    /// Chosen text/backing colors.
    pub colors: ColorPair,
    /// WCAG contrast ratio of the text color against `background` (diagnostic only).
    pub contrast_ratio: f64,
}

/// Where one line of text is drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextPlacement {
    /// Line text.
    pub text: String,
    /// Left edge of the text.
    pub x: f32,
    /// Top of the line slot.
    pub y: f32,
}

impl OverlayPlan {
    /// Text positions: left-aligned at `padding` for left anchors, right-aligned to
    /// `width - padding` for right anchors, one `line_height` slot per line.
    pub fn placements(&self) -> Vec<TextPlacement> {
        let pad = self.metrics.padding as f32;
        let left = self.bbox.x as f32 + pad;
        let right = self.bbox.x as f32 + self.bbox.width as f32 - pad;
        let top = self.bbox.y as f32 + pad;

        self.lines
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| TextPlacement {
                text: line.text.clone(),
                x: if self.anchor.is_right() {
                    right - line.width
                } else {
                    left
                },
                y: top + (i as f32) * self.lines.line_height as f32,
            })
            .collect()
    }
}

struct SurfaceMeasure<'a, S: ?Sized>(&'a mut S);

impl<S: DrawSurface + ?Sized> TextMeasure for SurfaceMeasure<'_, S> {
    fn measure(&mut self, text: &str, size_px: f32) -> OverprintResult<f32> {
        self.0.measure_text(text, size_px)
    }
}

/// Lay out, place, sample and pick colors, without drawing anything.
///
/// The box is resolved and clamped before sampling so the sampled pixels are exactly the
/// ones the backing will cover.
pub fn plan_overlay<S>(
    surface: &mut S,
    statement: &Statement,
    anchor: Anchor,
) -> OverprintResult<OverlayPlan>
where
    S: DrawSurface + ?Sized,
{
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(OverprintError::invalid_image(format!(
            "cannot overlay onto a {width}x{height} canvas"
        )));
    }

    let metrics = OverlayMetrics::for_canvas(width, height);
    let lines = wrap(
        statement.as_str(),
        metrics.font_size,
        metrics.max_text_width as f32,
        &mut SurfaceMeasure(&mut *surface),
    )?;

    let pad2 = metrics.padding.saturating_mul(2);
    let box_w = lines.block_width.saturating_add(pad2);
    let box_h = lines.block_height.saturating_add(pad2);
    let bbox = resolve(anchor, box_w, box_h, width, height, metrics.margin);
    let overflows = !bbox.fits_within(width, height);
    if overflows {
        tracing::warn!(
            box_w,
            box_h,
            width,
            height,
            "statement box is larger than the image; overlay will overflow"
        );
    }

    let sample_rect = PixelRect::clamped(
        i64::from(bbox.x),
        i64::from(bbox.y),
        i64::from(box_w),
        i64::from(box_h),
        width,
        height,
    );
    let background = average_rgb(&surface.read_pixels(sample_rect));
    let luminance = relative_luminance(background);
    let colors = ColorPair::for_scheme(scheme_for_luminance(luminance));
    let contrast = contrast_ratio(colors.text.into(), background);

    tracing::debug!(
        %anchor,
        x = bbox.x,
        y = bbox.y,
        box_w,
        box_h,
        lines = lines.lines.len(),
        font_size = metrics.font_size,
        luminance,
        scheme = ?colors.scheme,
        contrast,
        "overlay planned"
    );

    Ok(OverlayPlan {
        canvas_width: width,
        canvas_height: height,
        anchor,
        metrics,
        lines,
        bbox,
        overflows,
        background,
        luminance,
        colors,
        contrast_ratio: contrast,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/plan.rs"]
mod tests;
