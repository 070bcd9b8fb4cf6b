use thiserror::Error;

/// Raised when provider data does not satisfy a DTO constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("alpha2code must be exactly 2 ASCII letters, got '{0}'")]
    Alpha2Code(String),
}
