use crate::foundation::error::OverprintResult;
use crate::overlay::metrics::line_height_for;
use crate::text::font::TextMeasure;

/// One wrapped line and its measured advance width.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Line {
    /// Line text; words joined by single spaces.
    pub text: String,
    /// Measured width in pixels.
    pub width: f32,
}

/// Ordered wrapped lines plus the dimensions of the text block they form.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineSet {
    /// Lines top to bottom.
    pub lines: Vec<Line>,
    /// Vertical advance per line.
    pub line_height: u32,
    /// `ceil` of the widest line.
    pub block_width: u32,
    /// `lines.len() * line_height`.
    pub block_height: u32,
}

impl LineSet {
    /// Whitespace tokens of every line, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|l| l.text.split_whitespace())
    }
}

/// Greedy word wrap: words are never split, and a word wider than `max_width` gets a line
/// to itself.
///
/// A measurement failure fails the whole wrap.
pub fn wrap<M>(
    statement: &str,
    font_size: u32,
    max_width: f32,
    measure: &mut M,
) -> OverprintResult<LineSet>
where
    M: TextMeasure + ?Sized,
{
    let size_px = font_size as f32;
    let mut lines = Vec::<Line>::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in statement.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            current_width = measure.measure(&current, size_px)?;
            continue;
        }

        let candidate = format!("{current} {word}");
        let candidate_width = measure.measure(&candidate, size_px)?;
        if candidate_width <= max_width {
            current = candidate;
            current_width = candidate_width;
        } else {
            lines.push(Line {
                text: std::mem::take(&mut current),
                width: current_width,
            });
            current.push_str(word);
            current_width = measure.measure(&current, size_px)?;
        }
    }
    if !current.is_empty() {
        lines.push(Line {
            text: current,
            width: current_width,
        });
    }

    let line_height = line_height_for(font_size);
    let widest = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
    Ok(LineSet {
        block_width: widest.max(0.0).ceil() as u32,
        block_height: (lines.len() as u32).saturating_mul(line_height),
        line_height,
        lines,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
