use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Anchor;
use crate::foundation::error::{OverprintError, OverprintResult};
use crate::render::preview::DEFAULT_PREVIEW_MAX_WIDTH;
use crate::text::font::FontFace;

/// Runtime settings for the binary and for embedders that want file-driven setup.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverprintConfig {
    /// TrueType/OpenType face used for both preview and stamping; embedded DejaVu Sans when
    /// unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// Widest a preview frame may be.
    pub preview_max_width: u32,
    /// Stamp pool worker count; rayon's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Corner used when a request does not name one.
    pub default_anchor: Anchor,
    /// `tracing` level filter: `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
}

impl Default for OverprintConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            preview_max_width: DEFAULT_PREVIEW_MAX_WIDTH,
            threads: None,
            default_anchor: Anchor::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl OverprintConfig {
    /// Parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> OverprintResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse and validate JSON config text.
    pub fn from_json(text: &str) -> OverprintResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| OverprintError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no run can use.
    pub fn validate(&self) -> OverprintResult<()> {
        if self.preview_max_width == 0 {
            return Err(OverprintError::config("preview_max_width must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(OverprintError::config("threads must be >= 1 when set"));
        }
        self.level()?;
        Ok(())
    }

    /// `log_level` as a `tracing` level.
    pub fn level(&self) -> OverprintResult<tracing::Level> {
        self.log_level.trim().parse().map_err(|_| {
            OverprintError::config(format!("unknown log_level '{}'", self.log_level))
        })
    }

    /// Load the configured face, or the embedded one.
    pub fn font_face(&self) -> OverprintResult<FontFace> {
        match &self.font_path {
            Some(path) => FontFace::from_path(path),
            None => FontFace::embedded(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
