//! User domain built on the generic search engine
//!
//! A ready-made entity, repository contract, in-memory repository and output
//! mapping for user accounts. Also serves as the reference for wiring a new
//! entity type: define the props, a [`SearchStrategy`](crate::repository::SearchStrategy),
//! and alias [`InMemorySearchableRepository`](crate::repository::InMemorySearchableRepository).
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::repository::{Repository, SearchInput, SearchParams, SearchableRepository};
//! use searchable_repository::users::{User, UserInMemoryRepository, UserOutputMapper, UserProps};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let repository = UserInMemoryRepository::default();
//! for name in ["Ana", "Bruno", "Carla"] {
//!     let email = format!("{}@example.com", name.to_lowercase());
//!     repository.insert(User::new(UserProps::new(name, email, "hash"))).await.unwrap();
//! }
//!
//! let params = SearchParams::from(SearchInput::new().sort("name").sort_dir("asc").per_page(2));
//! let result = repository.search(params).await.unwrap();
//! let listing = UserOutputMapper::to_list_output(&result);
//!
//! assert_eq!(listing.total, 3);
//! assert_eq!(listing.last_page, 2);
//! assert_eq!(listing.items[0].name, "Ana");
//! # }
//! ```

mod entity;
mod output;
mod repository;

pub use entity::{User, UserProps};
pub use output::{ListUsersOutput, UserOutput, UserOutputMapper};
pub use repository::{UserInMemoryRepository, UserRepository, UserSearchResult, UserSearchStrategy};
