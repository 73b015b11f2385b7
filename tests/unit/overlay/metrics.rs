use super::*;

#[test]
fn portrait_1000x1500() {
    let m = OverlayMetrics::for_canvas(1000, 1500);
    assert_eq!(m.orientation, Orientation::Portrait);
    assert_eq!(m.font_size, 37);
    assert_eq!(m.line_height, 41);
    assert_eq!(m.padding, 18);
    assert_eq!(m.margin, 37);
    assert_eq!(m.max_text_width, 900 - 36);
}

#[test]
fn landscape_2000x1000() {
    let m = OverlayMetrics::for_canvas(2000, 1000);
    assert_eq!(m.orientation, Orientation::Landscape);
    assert_eq!(m.font_size, 25);
    assert_eq!(m.padding, 12);
    assert_eq!(m.margin, 25);
    assert_eq!(m.max_text_width, 900 - 24);
}

#[test]
fn small_images_hit_the_floors() {
    let m = OverlayMetrics::for_canvas(100, 100);
    assert_eq!(m.font_size, MIN_FONT_SIZE);
    assert_eq!(m.padding, MIN_PADDING);
    assert_eq!(m.margin, 12);
    assert_eq!(m.max_text_width, 45 - 12);

    let tiny = OverlayMetrics::for_canvas(10, 10);
    assert!(tiny.max_text_width < 0);
}

#[test]
fn floors_are_applied_before_derived_sizes() {
    assert_eq!(font_size_for(479), 12);
    assert_eq!(font_size_for(480), 12);
    assert_eq!(font_size_for(520), 13);
    assert_eq!(padding_for(13), 6);
    assert_eq!(padding_for(14), 7);
    assert_eq!(line_height_for(12), 16);
}

#[test]
fn width_budget_floors_fractional_pixels() {
    // 0.45 * 1001 = 450.45 -> 450
    let m = OverlayMetrics::for_canvas(1001, 480);
    assert_eq!(m.max_text_width, 450 - 12);
    // 0.90 * 333 = 299.7 -> 299
    let p = OverlayMetrics::for_canvas(333, 480);
    assert_eq!(p.max_text_width, 299 - 12);
}
