/// Convenience result type used across flexinfer.
pub type FlexResult<T> = Result<T, FlexError>;

/// Top-level error taxonomy used at the crate boundary.
///
/// Layout inference itself never fails; these errors only surface while loading,
/// validating, or emitting a scene.
#[derive(thiserror::Error, Debug)]
pub enum FlexError {
    /// Invalid user-provided scene or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while writing generated code.
    #[error("emit error: {0}")]
    Emit(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlexError {
    /// Build a [`FlexError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlexError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`FlexError::Emit`] value.
    pub fn emit(msg: impl Into<String>) -> Self {
        Self::Emit(msg.into())
    }
}

impl From<std::fmt::Error> for FlexError {
    fn from(_: std::fmt::Error) -> Self {
        Self::emit("formatter rejected output")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
