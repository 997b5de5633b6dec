use std::fmt;

#[derive(Debug)]
pub enum UniformError {
    ConfigError(String),
    ValidationError(String),
    AuthorizationError(String),
    ProviderUnavailable(String),
    ProviderError(String),
    EmptyResult(String),
    StorageError(String),
    SerializationError(String),
}

impl fmt::Display for UniformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            UniformError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UniformError::AuthorizationError(msg) => write!(f, "Authorization error: {}", msg),
            UniformError::ProviderUnavailable(msg) => {
                write!(f, "No generation provider available: {}", msg)
            }
            UniformError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            UniformError::EmptyResult(msg) => write!(f, "Empty result: {}", msg),
            UniformError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            UniformError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for UniformError {}

impl UniformError {
    /// Stable machine-readable code carried in failure responses.
    pub fn code(&self) -> &'static str {
        match self {
            UniformError::ConfigError(_) => "config_error",
            UniformError::ValidationError(_) => "validation_error",
            UniformError::AuthorizationError(_) => "authorization_error",
            UniformError::ProviderUnavailable(_) => "provider_unavailable",
            UniformError::ProviderError(_) => "provider_error",
            UniformError::EmptyResult(_) => "empty_result",
            UniformError::StorageError(_) => "storage_error",
            UniformError::SerializationError(_) => "serialization_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, UniformError>;
