/// Convenience result type used across overprint.
pub type OverprintResult<T> = Result<T, OverprintError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every error is scoped to a single overlay request; nothing here carries shared state.
#[derive(thiserror::Error, Debug)]
pub enum OverprintError {
    /// Statement is empty, whitespace-only, or too long.
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    /// Anchor is outside the closed four-corner set.
    #[error("invalid anchor: {0}")]
    InvalidAnchor(String),

    /// Image has zero area or a pixel buffer that does not match its dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Font bytes could not be registered or shaped.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverprintError {
    /// Build a [`OverprintError::InvalidStatement`] value.
    pub fn invalid_statement(msg: impl Into<String>) -> Self {
        Self::InvalidStatement(msg.into())
    }

    /// Build a [`OverprintError::InvalidAnchor`] value.
    pub fn invalid_anchor(msg: impl Into<String>) -> Self {
        Self::InvalidAnchor(msg.into())
    }

    /// Build a [`OverprintError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`OverprintError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`OverprintError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
