//! Repository trait definitions
//!
//! Generic CRUD and search contracts using RPITIT (Return Position Impl Trait
//! In Traits). Every operation is declared asynchronous so that in-memory and
//! I/O-bound backends share one interface, even when an implementation never
//! actually suspends.
//!
//! # Overview
//!
//! - [`Repository`]: insert, find by id, find all, update, delete by id
//! - [`SearchableRepository`]: adds `search(input) -> output`
//!
//! # Example
//!
//! ```rust,ignore
//! use searchable_repository::repository::{Repository, RepositoryResult};
//!
//! impl Repository<ProductProps> for PgProductRepository {
//!     async fn find_by_id(&self, id: &str) -> RepositoryResult<Entity<ProductProps>> {
//!         let row = self.fetch_optional(id).await?;
//!         row.map(Into::into)
//!             .ok_or_else(|| RepositoryError::not_found("Product", id))
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use super::error::RepositoryError;
use crate::entity::Entity;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository contract for CRUD operations
///
/// # Type Parameters
///
/// - `P`: the property bag of the stored [`Entity`] type
///
/// # Guarantees
///
/// - `insert` appends and performs no duplicate-id check
/// - `find_all` returns entities in insertion order as a fresh `Vec`
/// - `update` replaces in place, preserving position
/// - `delete_by_id` preserves the relative order of the remaining entities
/// - `find_by_id`, `update` and `delete_by_id` fail with a `NotFound`
///   [`RepositoryError`] when the id is unknown
pub trait Repository<P>: Send + Sync {
    /// Append an entity
    fn insert(&self, entity: Entity<P>) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Find an entity by its identifier
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no entity has this id.
    fn find_by_id(&self, id: &str) -> impl Future<Output = RepositoryResult<Entity<P>>> + Send;

    /// Return every stored entity in insertion order
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Entity<P>>>> + Send;

    /// Replace the stored entity that has the same id as `entity`
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no entity has this id.
    fn update(&self, entity: Entity<P>) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Remove the entity with the given id
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no entity has this id.
    fn delete_by_id(&self, id: &str) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Repository contract extended with a search operation
///
/// # Type Parameters
///
/// - `P`: the property bag of the stored entities
/// - `Input`: the search request type (e.g. [`SearchParams`](super::SearchParams))
/// - `Output`: the search response type (e.g. [`SearchResult`](super::SearchResult))
///
/// Every implementation must reproduce the same filter, sort and pagination
/// semantics as [`InMemorySearchableRepository`](super::InMemorySearchableRepository).
pub trait SearchableRepository<P, Input, Output>: Repository<P> {
    /// Run a search
    fn search(&self, input: Input) -> impl Future<Output = RepositoryResult<Output>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRepository;

    impl Repository<String> for MockRepository {
        async fn insert(&self, _entity: Entity<String>) -> RepositoryResult<()> {
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> RepositoryResult<Entity<String>> {
            Err(RepositoryError::not_found("Mock", id))
        }

        async fn find_all(&self) -> RepositoryResult<Vec<Entity<String>>> {
            Ok(vec![Entity::with_id("props".to_string(), "1")])
        }

        async fn update(&self, entity: Entity<String>) -> RepositoryResult<()> {
            Err(RepositoryError::not_found("Mock", entity.id()))
        }

        async fn delete_by_id(&self, _id: &str) -> RepositoryResult<()> {
            Ok(())
        }
    }

    impl SearchableRepository<String, String, usize> for MockRepository {
        async fn search(&self, input: String) -> RepositoryResult<usize> {
            Ok(input.len())
        }
    }

    #[test]
    fn test_repository_result_type() {
        let ok_result: RepositoryResult<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: RepositoryResult<i32> = Err(RepositoryError::not_found("Test", "123"));
        assert!(err_result.is_err());
    }

    #[tokio::test]
    async fn test_mock_repository_find_by_id() {
        let error = MockRepository.find_by_id("missing").await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_repository_find_all() {
        let all = MockRepository.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), "1");
    }

    #[tokio::test]
    async fn test_mock_searchable_repository() {
        let found = MockRepository.search("abc".to_string()).await.unwrap();
        assert_eq!(found, 3);
    }
}
