/// Result alias used across the crate.
pub type PanoResult<T> = Result<T, PanoError>;

/// Errors surfaced by media resolution, effect compilation and configuration loading.
///
/// `UnsupportedConfiguration` and `InvalidParameterSpec` are the two fatal authoring errors; every
/// other misconfiguration the resolver or compiler meets is absorbed and logged.
#[derive(thiserror::Error, Debug)]
pub enum PanoError {
    /// The media descriptor asks for something no playable source can provide.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A structured effect parameter (`{type, args}`) could not be constructed.
    #[error("invalid parameter spec: {0}")]
    InvalidParameterSpec(String),

    /// A configuration document is structurally invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration document could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanoError {
    /// Build an [`PanoError::UnsupportedConfiguration`].
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration(msg.into())
    }

    /// Build an [`PanoError::InvalidParameterSpec`].
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameterSpec(msg.into())
    }

    /// Build a [`PanoError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanoError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
