use crate::foundation::core::Rgba8;
use crate::overlay::sample::AverageRgb;

/// Backgrounds darker than this get light text.
pub const LUMINANCE_THRESHOLD: f64 = 0.5;
/// Backing alpha: 70% of 255, rounded.
pub const BACKING_ALPHA: u8 = 179;

const COEFF_R: f64 = 0.2126;
const COEFF_G: f64 = 0.7152;
const COEFF_B: f64 = 0.0722;

/// Which of the two fixed combinations was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// White text on translucent black.
    LightOnDark,
    /// Black text on translucent white.
    DarkOnLight,
}

/// Text and backing colors for one overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ColorPair {
    /// Chosen scheme.
    pub scheme: ColorScheme,
    /// Opaque text color.
    pub text: Rgba8,
    /// Backing color at [`BACKING_ALPHA`].
    pub backing: Rgba8,
}

impl ColorPair {
    /// The pair for `scheme`.
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::LightOnDark => Self {
                scheme,
                text: Rgba8::WHITE,
                backing: Rgba8::BLACK.with_alpha(BACKING_ALPHA),
            },
            ColorScheme::DarkOnLight => Self {
                scheme,
                text: Rgba8::BLACK,
                backing: Rgba8::WHITE.with_alpha(BACKING_ALPHA),
            },
        }
    }
}

/// sRGB transfer inverse for one 0-255 channel value.
pub fn srgb_to_linear(c: f64) -> f64 {
    let s = c / 255.0;
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a (possibly fractional) RGB triple.
pub fn relative_luminance(rgb: AverageRgb) -> f64 {
    COEFF_R * srgb_to_linear(rgb.r)
        + COEFF_G * srgb_to_linear(rgb.g)
        + COEFF_B * srgb_to_linear(rgb.b)
}

/// Scheme for a luminance value; exactly [`LUMINANCE_THRESHOLD`] counts as light.
pub fn scheme_for_luminance(luminance: f64) -> ColorScheme {
    if luminance < LUMINANCE_THRESHOLD {
        ColorScheme::LightOnDark
    } else {
        ColorScheme::DarkOnLight
    }
}

/// Pick the color pair for the average background color under the box.
pub fn select_colors(background: AverageRgb) -> ColorPair {
    ColorPair::for_scheme(scheme_for_luminance(relative_luminance(background)))
}

/// WCAG 2.1 contrast ratio, `1.0..=21.0`.
pub fn contrast_ratio(fg: AverageRgb, bg: AverageRgb) -> f64 {
    let a = relative_luminance(fg);
    let b = relative_luminance(bg);
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

impl From<Rgba8> for AverageRgb {
    fn from(c: Rgba8) -> Self {
        Self {
            r: f64::from(c.r),
            g: f64::from(c.g),
            b: f64::from(c.b),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/contrast.rs"]
mod tests;
