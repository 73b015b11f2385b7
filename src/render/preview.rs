use std::sync::Arc;

use crate::foundation::core::{Anchor, Statement};
use crate::foundation::error::{OverprintError, OverprintResult};
use crate::foundation::raster::Raster;
use crate::overlay::plan::OverlayPlan;
use crate::render::composite::overlay_on_surface;
use crate::render::cpu::CpuSurface;
use crate::text::font::FontFace;

/// Default cap on preview width in pixels.
pub const DEFAULT_PREVIEW_MAX_WIDTH: u32 = 700;

/// Immutable snapshot of the editor state, tagged with the generation it was issued under.
#[derive(Clone, Debug)]
pub struct PreviewRequest {
    /// Issue order; later snapshots have larger values.
    pub generation: u64,
    /// Full-size source; shared, never mutated.
    pub image: Arc<Raster>,
    /// Statement as typed.
    pub statement: String,
    /// Selected corner.
    pub anchor: Anchor,
}

/// Rendered preview of one snapshot.
#[derive(Clone, Debug)]
pub struct PreviewFrame {
    /// Generation of the snapshot this frame renders.
    pub generation: u64,
    /// Preview width divided by source width (1.0 when not downscaled).
    pub scale: f64,
    /// Downscaled image with the overlay applied.
    pub raster: Raster,
    /// Plan computed at preview resolution.
    pub plan: OverlayPlan,
}

/// Preview dimensions for a source of `width x height` capped at `max_width`.
///
/// Never upscales; the height follows the aspect ratio and is at least 1.
pub fn preview_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let h = (u64::from(height) * u64::from(max_width) + u64::from(width) / 2) / u64::from(width);
    (max_width, (h as u32).max(1))
}

/// Render one preview frame. Pure: the result depends only on `request`, `font` and
/// `max_width`.
///
/// The source is downscaled first, then run through the same overlay routine as
/// authoritative stamping.
#[tracing::instrument(
    skip(request, font),
    fields(generation = request.generation, anchor = %request.anchor)
)]
pub fn render_preview(
    request: &PreviewRequest,
    font: &FontFace,
    max_width: u32,
) -> OverprintResult<PreviewFrame> {
    if max_width == 0 {
        return Err(OverprintError::config("preview_max_width must be >= 1"));
    }
    let statement = Statement::parse(&request.statement)?;

    let src = request.image.as_ref();
    let (w, h) = preview_dimensions(src.width(), src.height(), max_width);
    let raster = if (w, h) == (src.width(), src.height()) {
        src.clone()
    } else {
        let img = src.to_rgba_image()?;
        let small = image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle);
        Raster::try_from(small)?
    };
    let scale = f64::from(w) / f64::from(src.width());

    let mut shaper = font.shaper()?;
    let mut surface = CpuSurface::new(raster, &mut shaper);
    let plan = overlay_on_surface(&mut surface, &statement, request.anchor)?;
    Ok(PreviewFrame {
        generation: request.generation,
        scale,
        raster: surface.into_raster(),
        plan,
    })
}

/// Latest-wins bookkeeping for an interactive preview.
///
/// Every input change goes through [`PreviewSession::submit`]; finished frames are handed
/// back through [`PreviewSession::accept`], which keeps only the frame for the newest
/// snapshot.
#[derive(Debug, Default)]
pub struct PreviewSession {
    latest: u64,
    current: Option<PreviewFrame>,
}

impl PreviewSession {
    /// Empty session; nothing issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a snapshot under the next generation.
    pub fn submit(
        &mut self,
        image: Arc<Raster>,
        statement: impl Into<String>,
        anchor: Anchor,
    ) -> PreviewRequest {
        self.latest += 1;
        PreviewRequest {
            generation: self.latest,
            image,
            statement: statement.into(),
            anchor,
        }
    }

    /// Most recently issued generation (0 before the first submit).
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// `true` if `generation` is the newest issued.
    pub fn is_current(&self, generation: u64) -> bool {
        generation != 0 && generation == self.latest
    }

    /// Keep `frame` if it renders the newest snapshot; drop it otherwise.
    pub fn accept(&mut self, frame: PreviewFrame) -> bool {
        if !self.is_current(frame.generation) {
            tracing::debug!(
                stale = frame.generation,
                latest = self.latest,
                "dropping stale preview frame"
            );
            return false;
        }
        self.current = Some(frame);
        true
    }

    /// Frame currently on display, if any.
    pub fn current(&self) -> Option<&PreviewFrame> {
        self.current.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
