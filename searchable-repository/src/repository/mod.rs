//! Repository contracts and the in-memory searchable implementation
//!
//! This module provides generic repository traits plus a search pipeline that
//! turns loosely-typed request parameters into a paginated result.
//!
//! # Features
//!
//! - **Generic CRUD**: [`Repository`] for insert, find, update and delete by id
//! - **Search**: [`SearchableRepository`] with filter, sort and paginate steps
//! - **Normalization**: [`SearchParams`] coerces raw input into valid parameters
//! - **Strategies**: [`SearchStrategy`] supplies per-entity filter and sort behavior
//! - **In-memory storage**: [`InMemoryRepository`] and [`InMemorySearchableRepository`]
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::repository::{SearchInput, SearchParams, SortDirection};
//! use serde_json::json;
//!
//! let params = SearchParams::from(
//!     SearchInput::new().page("2").per_page(json!(null)).sort("name").sort_dir("ASC"),
//! );
//!
//! assert_eq!(params.page(), 2);
//! assert_eq!(params.per_page(), 15);
//! assert_eq!(params.sort(), Some("name"));
//! assert_eq!(params.sort_dir(), Some(SortDirection::Asc));
//! ```

mod error;
mod in_memory;
mod search_params;
mod search_result;
mod searchable;
mod strategy;
mod traits;

// Re-export all public types
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use in_memory::InMemoryRepository;
pub use search_params::{
    SearchDefaults, SearchInput, SearchParams, SortDirection, DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
pub use search_result::{SearchResult, SearchResultProps};
pub use searchable::InMemorySearchableRepository;
pub use strategy::{
    apply_filter, apply_paginate, apply_sort, contains_ignore_case, FieldValue, FnStrategy,
    SearchStrategy,
};
pub use traits::{Repository, RepositoryResult, SearchableRepository};
