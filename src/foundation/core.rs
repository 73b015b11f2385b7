use std::{fmt, str::FromStr};

use crate::foundation::error::{OverprintError, OverprintResult};
use crate::foundation::math::premultiply_px;

/// Upper bound on statement length, in Unicode scalar values.
pub const MAX_STATEMENT_CHARS: usize = 500;

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Build a color from straight channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        premultiply_px([self.r, self.g, self.b, self.a])
    }

    /// Opaque RGB triple.
    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// One of the four fixed corners where the overlay box is placed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Anchor {
    /// Upper-left corner.
    TopLeft,
    /// Upper-right corner.
    TopRight,
    /// Lower-left corner.
    #[default]
    BottomLeft,
    /// Lower-right corner.
    BottomRight,
}

impl Anchor {
    /// All anchors in a stable order.
    pub const ALL: [Anchor; 4] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Kebab-case name (`"bottom-left"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }

    /// `true` for anchors on the right edge; their text is right-aligned.
    pub fn is_right(self) -> bool {
        matches!(self, Anchor::TopRight | Anchor::BottomRight)
    }

    /// `true` for anchors on the bottom edge.
    pub fn is_bottom(self) -> bool {
        matches!(self, Anchor::BottomLeft | Anchor::BottomRight)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = OverprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| {
                OverprintError::invalid_anchor(format!(
                    "'{s}' is not one of top-left, top-right, bottom-left, bottom-right"
                ))
            })
    }
}

impl TryFrom<String> for Anchor {
    type Error = OverprintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Image orientation; square images count as landscape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `height > width`.
    Portrait,
    /// `height <= width`.
    Landscape,
}

impl Orientation {
    /// Classify a `width x height` canvas.
    pub fn of(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Validated promoter statement text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement(String);

impl Statement {
    /// Validate `text`: non-blank and at most [`MAX_STATEMENT_CHARS`] characters.
    pub fn parse(text: &str) -> OverprintResult<Self> {
        if text.trim().is_empty() {
            return Err(OverprintError::invalid_statement(
                "statement must contain non-whitespace text",
            ));
        }
        let chars = text.chars().count();
        if chars > MAX_STATEMENT_CHARS {
            return Err(OverprintError::invalid_statement(format!(
                "statement is {chars} characters, limit is {MAX_STATEMENT_CHARS}"
            )));
        }
        Ok(Self(text.to_owned()))
    }

    /// Statement text as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overlay box in image pixel space.
///
/// Inside the image bounds unless the box itself is larger than the image, in which case the
/// origin collapses to zero and the box overflows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct OverlayBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl OverlayBox {
    /// Exclusive right edge.
    pub fn right(self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// `true` when the box lies fully inside a `width x height` canvas.
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.right() <= u64::from(width) && self.bottom() <= u64::from(height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
