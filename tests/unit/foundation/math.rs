use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(10, 76), 3);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(premul_over_px(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(
        premul_over_px([0, 0, 0, 255], [255, 0, 0, 255]),
        [255, 0, 0, 255]
    );
}

#[test]
fn straight_over_keeps_opaque_dst_opaque() {
    // 179/255 black over opaque white leaves 76/255 of the white.
    let out = straight_over_px([255, 255, 255, 255], [0, 0, 0, 179]);
    assert_eq!(out, [76, 76, 76, 255]);
}

#[test]
fn premultiply_round_trips_opaque_pixels() {
    let px = [12, 200, 99, 255];
    assert_eq!(unpremultiply_px(premultiply_px(px)), px);
    assert_eq!(premultiply_px([9, 9, 9, 0]), [0, 0, 0, 0]);
}
