/// Convenience result type used across the storyboard engine.
pub type StoryboardResult<T> = Result<T, StoryboardError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StoryboardError {
    /// Caller misuse: querying an untriggered decorator, exporting an unexportable construct,
    /// reading metadata a construct does not define.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Invalid user-provided or authoring data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving timeline state at a given time.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors while writing the text export form.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryboardError {
    /// Build a [`StoryboardError::InvalidOperation`] value.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Build a [`StoryboardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryboardError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`StoryboardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`StoryboardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for the programming-error class.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation(_))
    }
}

impl From<std::fmt::Error> for StoryboardError {
    fn from(_: std::fmt::Error) -> Self {
        Self::export("formatter reported an error")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
