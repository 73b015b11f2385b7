//! Overprint stamps a legally required promoter statement onto campaign images.
//!
//! One engine computes wrap, placement, background sampling and text color for both render
//! paths:
//!
//! - [`render_preview`] for an interactive, downscaled, latest-wins preview
//! - [`stamp`] / [`StampPool`] for the authoritative full-resolution output
//!
//! Both go through [`overlay_on_surface`] against the narrow [`DrawSurface`] seam, with the
//! same pinned [`FontFace`], so the preview shows what the stamped asset will look like.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod overlay;
mod render;
mod text;

pub use crate::assets::decode::{decode_raster, encode_png, load_raster, save_png};
pub use crate::config::OverprintConfig;
pub use crate::foundation::core::{
    Anchor, MAX_STATEMENT_CHARS, Orientation, OverlayBox, Rgba8, Statement,
};
pub use crate::foundation::error::{OverprintError, OverprintResult};
pub use crate::foundation::raster::{PixelRect, Raster};
pub use crate::overlay::contrast::{
    BACKING_ALPHA, ColorPair, ColorScheme, LUMINANCE_THRESHOLD, contrast_ratio,
    relative_luminance, select_colors,
};
pub use crate::overlay::metrics::OverlayMetrics;
pub use crate::overlay::plan::{OverlayPlan, TextPlacement, plan_overlay};
pub use crate::overlay::position::resolve;
pub use crate::overlay::sample::{AverageRgb, sample_region};
pub use crate::render::composite::{composite, overlay_on_surface};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::pipeline::{StampOutput, StampPool, StampRequest, stamp};
pub use crate::render::preview::{
    DEFAULT_PREVIEW_MAX_WIDTH, PreviewFrame, PreviewRequest, PreviewSession, render_preview,
};
pub use crate::render::surface::DrawSurface;
pub use crate::text::font::{
    EMBEDDED_FONT_BYTES, FontFace, TextBrushRgba8, TextMeasure, TextShaper,
};
pub use crate::text::wrap::{Line, LineSet, wrap};
