use crate::foundation::core::{Anchor, Statement};
use crate::foundation::error::OverprintResult;
use crate::overlay::plan::{OverlayPlan, plan_overlay};
use crate::render::surface::DrawSurface;

/// Paint a planned overlay: backing first, then every line in the text color.
pub fn composite<S>(surface: &mut S, plan: &OverlayPlan) -> OverprintResult<()>
where
    S: DrawSurface + ?Sized,
{
    surface.fill_rect(plan.bbox, plan.colors.backing)?;
    let size_px = plan.metrics.font_size as f32;
    for p in plan.placements() {
        surface.draw_text(&p.text, p.x, p.y, size_px, plan.colors.text)?;
    }
    Ok(())
}

/// The whole overlay on any surface: plan (layout, place, sample, color), then paint.
///
/// Preview and stamping both go through here.
pub fn overlay_on_surface<S>(
    surface: &mut S,
    statement: &Statement,
    anchor: Anchor,
) -> OverprintResult<OverlayPlan>
where
    S: DrawSurface + ?Sized,
{
    let plan = plan_overlay(surface, statement, anchor)?;
    composite(surface, &plan)?;
    Ok(plan)
}
