use super::*;
use crate::foundation::core::Rgba8;

fn split_image() -> Raster {
    // Left half black, right half white, 4x2.
    let mut data = Vec::new();
    for _y in 0..2 {
        for x in 0..4 {
            let v = if x < 2 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    Raster::from_rgba8(4, 2, data).unwrap()
}

#[test]
fn averages_the_whole_rect() {
    let img = split_image();
    let avg = sample_region(&img, 0, 0, 4, 2);
    assert_eq!(avg, AverageRgb::gray(127.5));
}

#[test]
fn samples_only_inside_the_rect() {
    let img = split_image();
    assert_eq!(sample_region(&img, 0, 0, 2, 2), AverageRgb::gray(0.0));
    assert_eq!(sample_region(&img, 2, 0, 2, 2), AverageRgb::gray(255.0));
}

#[test]
fn clamps_to_image_bounds() {
    let img = split_image();
    assert_eq!(sample_region(&img, 2, -10, 100, 100), AverageRgb::gray(255.0));
}

#[test]
fn zero_area_is_one_pixel() {
    let img = split_image();
    assert_eq!(sample_region(&img, 3, 1, 0, 0), AverageRgb::gray(255.0));
    assert_eq!(sample_region(&img, 0, 0, 0, 5), AverageRgb::gray(0.0));
}

#[test]
fn channels_are_independent() {
    let img = Raster::filled(3, 3, Rgba8::rgba(10, 20, 30, 255)).unwrap();
    let avg = sample_region(&img, 0, 0, 3, 3);
    assert_eq!((avg.r, avg.g, avg.b), (10.0, 20.0, 30.0));
}

#[test]
fn empty_bytes_average_to_black() {
    assert_eq!(average_rgb(&[]), AverageRgb::gray(0.0));
}
