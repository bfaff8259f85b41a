//! Error types for world mutation and template import/export.

use thiserror::Error;

/// Result type alias for engine operations that can fail.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by the engine. Missing block ids are not errors; lookups
/// return `Option` and drag calls return `bool` instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A block failed geometry or material validation.
    #[error("invalid block: {0}")]
    InvalidBlock(String),

    /// No template is stored at the requested index.
    #[error("no template at index {0}")]
    UnknownTemplate(usize),

    /// An import payload was valid JSON but not a list.
    #[error("template payload is not a list")]
    TemplatesNotAList,

    /// An import payload could not be parsed.
    #[error("failed to parse templates: {0}")]
    TemplateParse(#[source] serde_json::Error),

    /// A template entry parsed but carried out-of-range values.
    #[error("template {index} is invalid: {reason}")]
    InvalidTemplate { index: usize, reason: String },

    /// Templates could not be serialized.
    #[error("failed to serialize templates: {0}")]
    TemplateSerialize(#[source] serde_json::Error),
}

impl EngineError {
    /// Create an invalid block error.
    #[must_use]
    pub fn invalid_block(details: impl Into<String>) -> Self {
        Self::InvalidBlock(details.into())
    }
}
