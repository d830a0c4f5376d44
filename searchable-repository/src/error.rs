//! Crate-level error type

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Structured repository error with operation context
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Tracing subscriber could not be installed
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl Error {
    /// Whether this wraps a repository `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(error) if error.is_not_found())
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;

    #[test]
    fn test_repository_error_converts() {
        let error: Error = RepositoryError::not_found("User", "42").into();
        assert!(error.is_not_found());
        assert_eq!(
            error.to_string(),
            "Repository not_found error during find_by_id: Entity not found [User: 42]"
        );
    }

    #[test]
    fn test_conflict_is_not_not_found() {
        let error: Error =
            RepositoryError::conflict(RepositoryOperation::EmailExists, "Email address already used")
                .into();
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_every_variant_is_produced_by_a_conversion() {
        let errors = [
            Error::from(figment::Error::from("bad value".to_string())),
            Error::from(RepositoryError::not_found("User", "42")),
            Error::Tracing("already installed".to_string()),
        ];
        for error in errors {
            let prefix = match &error {
                Error::Config(_) => "Configuration error:",
                Error::Repository(_) => "Repository not_found error",
                Error::Tracing(_) => "Tracing error:",
            };
            assert!(error.to_string().starts_with(prefix), "{error}");
        }
    }

    #[test]
    fn test_figment_error_is_boxed() {
        let error: Error = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(error, Error::Config(_)));
        assert!(error.to_string().starts_with("Configuration error:"));
    }
}
