use super::*;

#[test]
fn embedded_face_exposes_family_name() {
    let face = FontFace::embedded().unwrap();
    assert!(face.family_name().contains("DejaVu"));
    assert_eq!(face.origin(), "embedded:DejaVuSans");
}

#[test]
fn garbage_bytes_are_a_font_error() {
    let err = FontFace::from_bytes(b"not a font".to_vec(), "inline").unwrap_err();
    assert!(matches!(err, OverprintError::Font(_)));
}

#[test]
fn missing_font_file_is_reported() {
    let err = FontFace::from_path(Path::new("does/not/exist.ttf")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.ttf"));
}

#[test]
fn measure_grows_with_text_and_size() {
    let mut shaper = FontFace::embedded().unwrap().shaper().unwrap();
    let short = shaper.measure("Authorised", 20.0).unwrap();
    let long = shaper.measure("Authorised by J. Smith", 20.0).unwrap();
    let big = shaper.measure("Authorised", 40.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!((big - 2.0 * short).abs() < 2.0);
    assert_eq!(shaper.measure("", 20.0).unwrap(), 0.0);
}

#[test]
fn two_shapers_of_one_face_agree() {
    let face = FontFace::embedded().unwrap();
    let mut a = face.shaper().unwrap();
    let mut b = face.shaper().unwrap();
    let text = "Authorised by J. Smith, 123 Main Street, Wellington";
    assert_eq!(a.measure(text, 37.0).unwrap(), b.measure(text, 37.0).unwrap());
}

#[test]
fn closures_measure_too() {
    let mut fixed = |t: &str, size: f32| t.chars().count() as f32 * size * 0.5;
    assert_eq!(fixed.measure("abcd", 10.0).unwrap(), 20.0);
}

#[test]
fn measuring_at_an_unusable_size_is_a_font_error() {
    let mut shaper = FontFace::embedded().unwrap().shaper().unwrap();
    for size in [0.0, -3.0, f32::NAN] {
        let err = shaper.measure("Authorised", size).unwrap_err();
        assert!(matches!(err, OverprintError::Font(_)), "{size}");
    }
}
