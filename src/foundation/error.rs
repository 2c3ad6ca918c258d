/// Convenience result type used across Photofield.
pub type PhotofieldResult<T> = Result<T, PhotofieldError>;

/// Top-level error taxonomy used by layout and scene APIs.
#[derive(thiserror::Error, Debug)]
pub enum PhotofieldError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The entropy source failed while generating a scene id.
    #[error("id generation error: {0}")]
    IdGeneration(String),

    /// An external collaborator broke its contract (e.g. no info for an id it listed).
    #[error("contract violation: {0}")]
    Contract(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotofieldError {
    /// Build a [`PhotofieldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotofieldError::IdGeneration`] value.
    pub fn id_generation(msg: impl Into<String>) -> Self {
        Self::IdGeneration(msg.into())
    }

    /// Build a [`PhotofieldError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`PhotofieldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
