//! # searchable-repository
//!
//! Storage-agnostic entity repositories with one uniform search protocol:
//! loosely-typed request parameters in, a paginated and sorted result out.
//!
//! ## Features
//!
//! - **Entities**: [`Entity`](entity::Entity) pairs a stable UUID identity with a property bag
//! - **Repository contract**: async CRUD by id plus `search`, implementable by any backend
//! - **Normalization**: raw `page`, `perPage`, `sort`, `sortDir`, `filter` values are coerced into valid parameters, never rejected
//! - **Search pipeline**: filter, then stable sort, then paginate, with a pluggable per-entity strategy
//! - **Pagination output**: the public `{items, total, currentPage, lastPage, perPage}` shape
//! - **User domain**: a reference entity and repository (`users` feature, on by default)
//!
//! ## Example
//!
//! ```rust,no_run
//! use searchable_repository::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     let repository = UserInMemoryRepository::default();
//!     repository
//!         .insert(User::new(UserProps::new("Ana", "ana@example.com", "hash")))
//!         .await?;
//!
//!     // Normalize untrusted input with the configured page size
//!     let input: SearchInput = serde_json::from_str(r#"{"page": "1", "perPage": "abc", "filter": "an"}"#)
//!         .unwrap_or_default();
//!     let params = SearchParams::normalize_with(&input, &config.search.defaults());
//!
//!     let result = repository.search(params).await?;
//!     let listing = UserOutputMapper::to_list_output(&result);
//!     tracing::info!(total = listing.total, "listed users");
//!
//!     shutdown_tracing();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod observability;
pub mod pagination;
pub mod repository;

#[cfg(feature = "users")]
pub mod users;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, LogFormat, SearchConfig, ServiceConfig};
    pub use crate::entity::Entity;
    pub use crate::error::{Error, Result};
    pub use crate::observability::{init_tracing, shutdown_tracing};
    pub use crate::pagination::{PaginationOutput, PaginationOutputMapper};
    pub use crate::repository::{
        contains_ignore_case, FieldValue, FnStrategy, InMemoryRepository,
        InMemorySearchableRepository, Repository, RepositoryError, RepositoryErrorKind,
        RepositoryOperation, RepositoryResult, SearchDefaults, SearchInput, SearchParams,
        SearchResult, SearchStrategy, SearchableRepository, SortDirection,
    };

    #[cfg(feature = "users")]
    pub use crate::users::{
        User, UserInMemoryRepository, UserOutput, UserOutputMapper, UserProps, UserRepository,
        UserSearchStrategy,
    };
}
