//! Error types for factory generation

use thiserror::Error;
use wiregen_di::DiError;

/// Errors that can occur while generating factories
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The type could not be resolved
    #[error(transparent)]
    Resolution(#[from] DiError),

    /// Namespace is not a valid module path
    #[error("Invalid namespace '{0}': expected a module path such as crate::generated")]
    InvalidNamespace(String),

    /// A plan binding has no source-level representation
    #[error("Cannot emit a literal for {type_name}::{parameter}: {reason}")]
    UnrepresentableLiteral {
        type_name: String,
        parameter: String,
        reason: String,
    },

    /// Two types map to the same factory module
    #[error("Artifact id '{artifact_id}' is already used by the factory for '{owner}'")]
    DuplicateArtifact { artifact_id: String, owner: String },

    /// Template registration failed
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// An artifact could not be stored
    #[error("Failed to write artifact '{path}': {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generator settings could not be loaded
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl GenerationError {
    /// Whether this is an emission or storage failure rather than a
    /// resolution problem
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. }
                | Self::Io(_)
                | Self::Resolution(DiError::InfrastructureError { .. })
        )
    }

    /// The underlying resolution error, if any
    pub fn resolution(&self) -> Option<&DiError> {
        match self {
            Self::Resolution(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;
