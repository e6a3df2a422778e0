//! Error types for resolution and injection

/// Errors that can occur while resolving or constructing a type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiError {
    #[error("The type '{type_name}' does not exist")]
    NotFound { type_name: String },

    #[error("Circular alias detected: {}", .chain.join(" -> "))]
    CircularAlias { chain: Vec<String> },

    #[error("Circular dependency detected: {}", .chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },

    #[error("Missing value for required parameter '{parameter}' of '{type_name}'")]
    MissingParameter { type_name: String, parameter: String },

    #[error("The type '{type_name}' is abstract and no preference is configured")]
    NotInstantiable { type_name: String },

    #[error("Failed to construct '{type_name}': {message}")]
    Construction { type_name: String, message: String },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Infrastructure error: {message}")]
    InfrastructureError { message: String },
}

impl DiError {
    pub fn not_found(type_name: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
        }
    }

    pub fn missing_parameter(type_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            type_name: type_name.into(),
            parameter: parameter.into(),
        }
    }

    pub fn construction(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::InfrastructureError {
            message: message.into(),
        }
    }

    /// Whether this error means the type needs caller-supplied data rather
    /// than being broken.
    pub fn requires_caller_input(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::NotInstantiable { .. }
        )
    }
}

pub type DiResult<T> = Result<T, DiError>;
