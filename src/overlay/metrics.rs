//! Size formulas shared by every render path.
//!
//! These are fixed, not configurable: changing any of them changes where text lands on
//! already-issued assets.

use crate::foundation::core::Orientation;

/// Smallest font size in pixels.
pub const MIN_FONT_SIZE: u32 = 12;
/// Font size is `floor(height / 40)`, i.e. 2.5% of image height.
pub const FONT_SIZE_HEIGHT_DIVISOR: u32 = 40;
/// Extra leading added to the font size to get the line height.
pub const LINE_GAP: u32 = 4;
/// Smallest padding between the backing edge and the text.
pub const MIN_PADDING: u32 = 6;
/// Smallest distance between the box and the anchored image edges.
pub const MIN_MARGIN: u32 = 8;
/// Share of the image width available to a portrait overlay, in percent.
pub const PORTRAIT_WIDTH_PERCENT: u64 = 90;
/// Share of the image width available to a landscape or square overlay, in percent.
pub const LANDSCAPE_WIDTH_PERCENT: u64 = 45;

/// Derived sizes for one canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OverlayMetrics {
    /// Canvas orientation the width budget was chosen for.
    pub orientation: Orientation,
    /// Font size in pixels.
    pub font_size: u32,
    /// Vertical advance per line.
    pub line_height: u32,
    /// Padding inside the backing on each side.
    pub padding: u32,
    /// Distance from the anchored edges.
    pub margin: u32,
    /// Widest a line may be; may be negative on very narrow images.
    pub max_text_width: i64,
}

impl OverlayMetrics {
    /// Compute metrics for a `width x height` canvas.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let orientation = Orientation::of(width, height);
        let font_size = font_size_for(height);
        let padding = padding_for(font_size);
        let percent = match orientation {
            Orientation::Portrait => PORTRAIT_WIDTH_PERCENT,
            Orientation::Landscape => LANDSCAPE_WIDTH_PERCENT,
        };
        let budget = (u64::from(width) * percent / 100) as i64;
        Self {
            orientation,
            font_size,
            line_height: line_height_for(font_size),
            padding,
            margin: MIN_MARGIN.max(font_size),
            max_text_width: budget - 2 * i64::from(padding),
        }
    }
}

/// `max(12, floor(height x 0.025))`.
pub fn font_size_for(height: u32) -> u32 {
    MIN_FONT_SIZE.max(height / FONT_SIZE_HEIGHT_DIVISOR)
}

/// `font_size + 4`.
pub fn line_height_for(font_size: u32) -> u32 {
    font_size.saturating_add(LINE_GAP)
}

/// `max(6, floor(font_size / 2))`.
pub fn padding_for(font_size: u32) -> u32 {
    MIN_PADDING.max(font_size / 2)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/metrics.rs"]
mod tests;
