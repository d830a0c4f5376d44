//! Repository error types
//!
//! Structured errors raised by repository operations. The search pipeline
//! itself never fails; only identity lookups and domain uniqueness checks do.
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("Entity", "3803b5ac-b2f3-4302-b87c-18bf57e5b18f");
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert_eq!(error.message, "Entity not found");
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Appending a new entity
    Insert,
    /// Finding a single entity by ID
    FindById,
    /// Listing every stored entity
    FindAll,
    /// Replacing an existing entity
    Update,
    /// Removing an entity by ID
    DeleteById,
    /// Running the filter, sort and paginate pipeline
    Search,
    /// Finding a user by email address
    FindByEmail,
    /// Checking that an email address is still free
    EmailExists,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Update => write!(f, "update"),
            Self::DeleteById => write!(f, "delete_by_id"),
            Self::Search => write!(f, "search"),
            Self::FindByEmail => write!(f, "find_by_email"),
            Self::EmailExists => write!(f, "email_exists"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// No entity matched the lookup
    NotFound,
    /// A domain uniqueness rule was violated (e.g. email already in use)
    Conflict,
    /// Other unclassified error, typically from a storage adapter
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
///
/// # Example
///
/// ```rust
/// use searchable_repository::repository::{RepositoryError, RepositoryOperation};
///
/// let error = RepositoryError::not_found("Entity", "fakeId")
///     .with_operation(RepositoryOperation::DeleteById);
/// assert_eq!(
///     error.to_string(),
///     "Repository not_found error during delete_by_id: Entity not found [Entity: fakeId]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "User")
    pub entity_type: Option<String>,
    /// The ID (or other lookup key) of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error without entity context
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error for an identity lookup
    ///
    /// The message is always `Entity not found`; use [`with_operation`](Self::with_operation)
    /// to record which contract method raised it.
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::FindById,
            kind: RepositoryErrorKind::NotFound,
            message: "Entity not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create a conflict error for a violated uniqueness rule
    ///
    /// # Example
    ///
    /// ```rust
    /// use searchable_repository::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
    ///
    /// let error = RepositoryError::conflict(RepositoryOperation::EmailExists, "Email address already used");
    /// assert_eq!(error.kind, RepositoryErrorKind::Conflict);
    /// ```
    pub fn conflict(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Conflict, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether this error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }

    /// Whether this error reports a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        self.kind == RepositoryErrorKind::Conflict
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}
