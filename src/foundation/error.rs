/// Convenience result type used across lamina.
pub type LaminaResult<T> = Result<T, LaminaError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LaminaError {
    /// Invalid manifest or configuration data.
    #[error("config error: {0}")]
    Config(String),

    /// A named image, layer, or count entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Errors while reading or decoding asset bytes.
    #[error("load error: {0}")]
    Load(String),

    /// A layer dependency chain refers back to itself.
    #[error("cycle error: {0}")]
    Cycle(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaminaError {
    /// Build a [`LaminaError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`LaminaError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`LaminaError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`LaminaError::Cycle`] value.
    pub fn cycle(msg: impl Into<String>) -> Self {
        Self::Cycle(msg.into())
    }

    /// Build a [`LaminaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
