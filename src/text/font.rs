use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{OverprintError, OverprintResult};

/// DejaVu Sans, pinned so preview and stamping measure and draw with the same face.
pub const EMBEDDED_FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Anything that can report the advance width of a run of text at a pixel size.
pub trait TextMeasure {
    /// Width in pixels of `text` set at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32) -> OverprintResult<f32>;
}

/// Plain width functions never fail.
impl<F> TextMeasure for F
where
    F: FnMut(&str, f32) -> f32,
{
    fn measure(&mut self, text: &str, size_px: f32) -> OverprintResult<f32> {
        Ok(self(text, size_px))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Immutable, cheaply clonable font identity shared by every render path.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    family: String,
    origin: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("origin", &self.origin)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// The face compiled into the crate.
    pub fn embedded() -> OverprintResult<Self> {
        Self::from_bytes(EMBEDDED_FONT_BYTES.to_vec(), "embedded:DejaVuSans")
    }

    /// Load a TrueType/OpenType face from disk.
    pub fn from_path(path: &Path) -> OverprintResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        Self::from_bytes(bytes, path.display().to_string())
    }

    /// Register `bytes` once to validate them and capture the family name.
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<String>) -> OverprintResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
            origin: origin.into(),
        })
    }

    /// Primary family name read from the font data.
    pub fn family_name(&self) -> &str {
        &self.family
    }

    /// Where the face was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Build a shaper that owns its own Parley contexts.
    pub fn shaper(&self) -> OverprintResult<TextShaper> {
        TextShaper::new(self)
    }
}

/// Mutable shaping state for one [`FontFace`]; one per thread.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font_data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl TextShaper {
    fn new(face: &FontFace) -> OverprintResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, face.bytes())?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font_data,
        })
    }

    /// Font data handed to the glyph rasterizer.
    pub fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    /// Shape `text` as a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> OverprintResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(OverprintError::font("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str, size_px: f32) -> OverprintResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, size_px, TextBrushRgba8::default())?;
        Ok(layout.width())
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> OverprintResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| OverprintError::font("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| OverprintError::font("registered font family has no name"))
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
