use std::io;

use thiserror::Error;

/// Library-wide error type for intunify operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Input validation failure.
    #[error("{0}")]
    Validation(String),

    /// A catalog record violates a validation rule.
    #[error("Catalog entry {index}: {reason}")]
    InvalidCatalogEntry { index: usize, reason: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// A template does not satisfy its slot contract.
    #[error("Template '{name}' is invalid: {reason}")]
    TemplateInvalid { name: String, reason: String },

    /// A template failed to render.
    #[error("Template '{name}' failed to render: {reason}")]
    TemplateRender { name: String, reason: String },
}

impl AppError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }
}
