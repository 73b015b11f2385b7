use super::*;
use crate::foundation::core::Rgba8;
use crate::foundation::raster::Raster;
use crate::overlay::contrast::ColorScheme;

/// Raster-backed surface with a 0.5em-per-char measure and no-op drawing.
struct FakeSurface {
    raster: Raster,
    measured: usize,
}

impl FakeSurface {
    fn new(raster: Raster) -> Self {
        Self {
            raster,
            measured: 0,
        }
    }
}

impl DrawSurface for FakeSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }

    fn measure_text(&mut self, text: &str, size_px: f32) -> OverprintResult<f32> {
        self.measured += 1;
        Ok(text.chars().count() as f32 * size_px * 0.5)
    }

    fn read_pixels(&self, rect: PixelRect) -> Vec<u8> {
        self.raster.read_pixels(rect)
    }

    fn fill_rect(&mut self, _rect: OverlayBox, _color: Rgba8) -> OverprintResult<()> {
        Ok(())
    }

    fn draw_text(&mut self, _: &str, _: f32, _: f32, _: f32, _: Rgba8) -> OverprintResult<()> {
        Ok(())
    }
}

const SMITH: &str = "Authorised by J. Smith, 123 Main Street, Wellington";

#[test]
fn portrait_bottom_left_scenario() {
    let mut s = FakeSurface::new(Raster::filled(1000, 1500, Rgba8::WHITE).unwrap());
    let plan = plan_overlay(
        &mut s,
        &Statement::parse(SMITH).unwrap(),
        Anchor::BottomLeft,
    )
    .unwrap();

    assert_eq!(plan.metrics.font_size, 37);
    assert_eq!(plan.metrics.margin, 37);
    assert_eq!(plan.metrics.max_text_width, 864);
    // 51 chars * 18.5 px = 943.5 > 864, so the statement wraps onto two lines.
    assert_eq!(plan.lines.lines.len(), 2);
    assert_eq!(plan.bbox.x, 37);
    assert_eq!(plan.bbox.y, 1500 - plan.bbox.height - 37);
    assert_eq!(
        plan.bbox.height,
        plan.lines.block_height + 2 * plan.metrics.padding
    );
    assert!(!plan.overflows);
    assert_eq!(plan.colors.scheme, ColorScheme::DarkOnLight);
    assert!(s.measured > 0);
}

#[test]
fn dark_landscape_selects_light_text() {
    let mut s = FakeSurface::new(Raster::filled(2000, 1000, Rgba8::rgba(10, 10, 10, 255)).unwrap());
    let plan = plan_overlay(
        &mut s,
        &Statement::parse(SMITH).unwrap(),
        Anchor::TopRight,
    )
    .unwrap();
    assert_eq!(plan.background, AverageRgb::gray(10.0));
    assert!(plan.luminance < 0.5);
    assert_eq!(plan.colors.scheme, ColorScheme::LightOnDark);
    assert_eq!(plan.colors.text, Rgba8::WHITE);
    assert!(plan.contrast_ratio > 15.0);
}

#[test]
fn samples_under_the_clamped_box_only() {
    // Black top band, white below; a bottom anchor must see only white.
    let (w, h) = (400u32, 400u32);
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let v = if y < 200 { 0 } else { 255 };
        for _ in 0..w {
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let raster = Raster::from_rgba8(w, h, data).unwrap();
    let st = Statement::parse("Authorised by A. Person").unwrap();

    let mut s = FakeSurface::new(raster.clone());
    let bottom = plan_overlay(&mut s, &st, Anchor::BottomLeft).unwrap();
    assert_eq!(bottom.background, AverageRgb::gray(255.0));
    assert_eq!(bottom.colors.scheme, ColorScheme::DarkOnLight);

    let mut s = FakeSurface::new(raster);
    let top = plan_overlay(&mut s, &st, Anchor::TopLeft).unwrap();
    assert_eq!(top.background, AverageRgb::gray(0.0));
    assert_eq!(top.colors.scheme, ColorScheme::LightOnDark);
}

#[test]
fn oversized_statement_overflows_without_error() {
    let mut s = FakeSurface::new(Raster::filled(20, 20, Rgba8::WHITE).unwrap());
    let long = "Authorised by a very long promoter name at an even longer street address";
    let plan = plan_overlay(&mut s, &Statement::parse(long).unwrap(), Anchor::BottomRight)
        .unwrap();
    assert!(plan.overflows);
    assert_eq!((plan.bbox.x, plan.bbox.y), (0, 0));
}

#[test]
fn right_anchor_right_aligns_lines() {
    let mut s = FakeSurface::new(Raster::filled(1000, 1500, Rgba8::WHITE).unwrap());
    let plan = plan_overlay(
        &mut s,
        &Statement::parse(SMITH).unwrap(),
        Anchor::BottomRight,
    )
    .unwrap();
    let pad = plan.metrics.padding as f32;
    let right_edge = (plan.bbox.x + plan.bbox.width) as f32 - pad;
    for (p, line) in plan.placements().iter().zip(&plan.lines.lines) {
        assert!((p.x + line.width - right_edge).abs() < 1e-3);
    }

    let mut s = FakeSurface::new(Raster::filled(1000, 1500, Rgba8::WHITE).unwrap());
    let left = plan_overlay(
        &mut s,
        &Statement::parse(SMITH).unwrap(),
        Anchor::BottomLeft,
    )
    .unwrap();
    for (i, p) in left.placements().iter().enumerate() {
        assert_eq!(p.x, (left.bbox.x + left.metrics.padding) as f32);
        let slot = left.bbox.y + left.metrics.padding + i as u32 * left.lines.line_height;
        assert_eq!(p.y, slot as f32);
    }
}

#[test]
fn anchors_share_box_size_and_touch_their_edges() {
    let (w, h) = (1200u32, 900u32);
    let st = Statement::parse(SMITH).unwrap();
    let mut sizes = Vec::new();
    for a in Anchor::ALL {
        let mut s = FakeSurface::new(Raster::filled(w, h, Rgba8::WHITE).unwrap());
        let p = plan_overlay(&mut s, &st, a).unwrap();
        let m = p.metrics.margin;
        sizes.push((p.bbox.width, p.bbox.height));
        match a {
            Anchor::TopLeft => assert_eq!((p.bbox.x, p.bbox.y), (m, m)),
            Anchor::TopRight => {
                assert_eq!(p.bbox.right(), u64::from(w - m));
                assert_eq!(p.bbox.y, m);
            }
            Anchor::BottomLeft => {
                assert_eq!(p.bbox.x, m);
                assert_eq!(p.bbox.bottom(), u64::from(h - m));
            }
            Anchor::BottomRight => {
                assert_eq!(p.bbox.right(), u64::from(w - m));
                assert_eq!(p.bbox.bottom(), u64::from(h - m));
            }
        }
    }
    assert!(sizes.windows(2).all(|s| s[0] == s[1]));
}
