use crate::foundation::core::{Anchor, OverlayBox};

/// Place a `box_w x box_h` box at `anchor`, `margin` pixels in from the two named edges,
/// then clamp it into the image.
///
/// A box larger than the image on an axis collapses to 0 on that axis and overflows.
pub fn resolve(
    anchor: Anchor,
    box_w: u32,
    box_h: u32,
    image_w: u32,
    image_h: u32,
    margin: u32,
) -> OverlayBox {
    let (bw, bh) = (i64::from(box_w), i64::from(box_h));
    let (iw, ih) = (i64::from(image_w), i64::from(image_h));
    let m = i64::from(margin);

    let x = if anchor.is_right() { iw - bw - m } else { m };
    let y = if anchor.is_bottom() { ih - bh - m } else { m };

    OverlayBox {
        x: clamp_axis(x, iw - bw),
        y: clamp_axis(y, ih - bh),
        width: box_w,
        height: box_h,
    }
}

// Upper bound first, then the zero floor: an oversized box ends at 0, not at a negative
// offset.
fn clamp_axis(v: i64, max: i64) -> u32 {
    v.min(max).max(0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/position.rs"]
mod tests;
