use super::*;

#[test]
fn anchor_parses_kebab_case_names() {
    for a in Anchor::ALL {
        assert_eq!(a.as_str().parse::<Anchor>().unwrap(), a);
    }
    assert_eq!(" top-right ".parse::<Anchor>().unwrap(), Anchor::TopRight);
}

#[test]
fn anchor_rejects_values_outside_closed_set() {
    for bad in ["center", "Top-Left", "", "bottom_left"] {
        let err = bad.parse::<Anchor>().unwrap_err();
        assert!(matches!(err, OverprintError::InvalidAnchor(_)), "{bad}");
    }
}

#[test]
fn anchor_serde_uses_kebab_case() {
    let s = serde_json::to_string(&Anchor::BottomRight).unwrap();
    assert_eq!(s, "\"bottom-right\"");
    let a: Anchor = serde_json::from_str("\"top-left\"").unwrap();
    assert_eq!(a, Anchor::TopLeft);
    let err = serde_json::from_str::<Anchor>("\"middle\"").unwrap_err();
    assert!(err.to_string().contains("invalid anchor"), "{err}");
}

#[test]
fn orientation_treats_square_as_landscape() {
    assert_eq!(Orientation::of(1000, 1500), Orientation::Portrait);
    assert_eq!(Orientation::of(2000, 1000), Orientation::Landscape);
    assert_eq!(Orientation::of(800, 800), Orientation::Landscape);
}

#[test]
fn statement_rejects_blank_text() {
    for bad in ["", "   ", "\t\n"] {
        let err = Statement::parse(bad).unwrap_err();
        assert!(matches!(err, OverprintError::InvalidStatement(_)));
    }
}

#[test]
fn statement_length_limit_counts_chars_not_bytes() {
    let ok = "é".repeat(MAX_STATEMENT_CHARS);
    assert!(Statement::parse(&ok).is_ok());

    let too_long = "a".repeat(MAX_STATEMENT_CHARS + 1);
    assert!(matches!(
        Statement::parse(&too_long),
        Err(OverprintError::InvalidStatement(_))
    ));
}

#[test]
fn premul_scales_channels_by_alpha() {
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::rgba(255, 255, 255, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::rgba(200, 100, 0, 128).to_premul(), [100, 50, 0, 128]);
}

#[test]
fn overlay_box_containment() {
    let b = OverlayBox {
        x: 10,
        y: 20,
        width: 30,
        height: 40,
    };
    assert_eq!(b.right(), 40);
    assert_eq!(b.bottom(), 60);
    assert!(b.fits_within(40, 60));
    assert!(!b.fits_within(39, 60));
}

#[test]
fn premul_matches_the_shared_pixel_helper() {
    for a in [0u8, 1, 77, 128, 179, 254, 255] {
        for c in [0u8, 1, 99, 128, 200, 255] {
            let color = Rgba8::rgba(c, 255 - c, c / 2, a);
            assert_eq!(
                color.to_premul(),
                crate::foundation::math::premultiply_px([c, 255 - c, c / 2, a])
            );
        }
    }
}
