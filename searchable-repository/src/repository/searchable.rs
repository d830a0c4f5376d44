//! In-memory searchable repository
//!
//! Runs the search pipeline over a snapshot of an [`InMemoryRepository`]:
//! filter, then sort, then paginate. `total` is counted after filtering and
//! before pagination.

use super::error::RepositoryOperation;
use super::in_memory::InMemoryRepository;
use super::search_params::{SearchParams, SortDirection};
use super::search_result::{SearchResult, SearchResultProps};
use super::strategy::{self, SearchStrategy};
use super::traits::{Repository, RepositoryResult, SearchableRepository};
use crate::entity::Entity;

/// In-memory repository with a filter/sort/paginate search
///
/// # Example
///
/// ```rust
/// use searchable_repository::entity::Entity;
/// use searchable_repository::repository::{
///     contains_ignore_case, FieldValue, FnStrategy, InMemorySearchableRepository, Repository,
///     SearchInput, SearchParams, SearchableRepository,
/// };
///
/// # #[tokio::main]
/// # async fn main() {
/// let strategy = FnStrategy::new(
///     &["name"],
///     |entity: &Entity<String>, _field: &str| Some(FieldValue::from(entity.props().as_str())),
///     |entity: &Entity<String>, filter: &str| contains_ignore_case(entity.props(), filter),
/// );
/// let repository = InMemorySearchableRepository::new(strategy);
/// for name in ["b", "a", "TEST", "test"] {
///     repository.insert(Entity::new(name.to_string())).await.unwrap();
/// }
///
/// let params = SearchParams::from(SearchInput::new().filter("test").sort("name").sort_dir("asc"));
/// let result = repository.search(params).await.unwrap();
///
/// assert_eq!(result.total(), 2);
/// let names: Vec<_> = result.items().iter().map(|e| e.props().as_str()).collect();
/// assert_eq!(names, ["TEST", "test"]);
/// # }
/// ```
pub struct InMemorySearchableRepository<P, S> {
    repository: InMemoryRepository<P>,
    strategy: S,
}

impl<P, S> InMemorySearchableRepository<P, S>
where
    S: SearchStrategy<P>,
{
    /// Create an empty repository searching with `strategy`
    pub fn new(strategy: S) -> Self {
        Self::with_repository(InMemoryRepository::new(), strategy)
    }

    /// Wrap an existing in-memory repository
    pub fn with_repository(repository: InMemoryRepository<P>, strategy: S) -> Self {
        Self {
            repository,
            strategy,
        }
    }

    /// The underlying storage
    pub fn repository(&self) -> &InMemoryRepository<P> {
        &self.repository
    }

    /// The search behavior of the stored entity type
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Field names honored by the sort step
    pub fn sortable_fields(&self) -> &[&'static str] {
        self.strategy.sortable_fields()
    }

    /// Filter step using this repository's predicate
    pub fn apply_filter(&self, items: Vec<Entity<P>>, filter: Option<&str>) -> Vec<Entity<P>> {
        strategy::apply_filter(items, filter, &self.strategy)
    }

    /// Sort step
    ///
    /// When `sort` is absent the strategy's default sort applies, if it has one.
    pub fn apply_sort(
        &self,
        items: Vec<Entity<P>>,
        sort: Option<&str>,
        sort_dir: Option<SortDirection>,
    ) -> Vec<Entity<P>> {
        match (sort, self.strategy.default_sort()) {
            (None, Some((field, direction))) => {
                strategy::apply_sort(items, Some(field), Some(direction), &self.strategy)
            }
            _ => strategy::apply_sort(items, sort, sort_dir, &self.strategy),
        }
    }

    /// Pagination step
    pub fn apply_paginate(
        &self,
        items: Vec<Entity<P>>,
        page: u64,
        per_page: u64,
    ) -> Vec<Entity<P>> {
        strategy::apply_paginate(items, page, per_page)
    }
}

impl<P, S> Default for InMemorySearchableRepository<P, S>
where
    S: SearchStrategy<P> + Default,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<P, S> Repository<P> for InMemorySearchableRepository<P, S>
where
    P: Clone + Send + Sync,
    S: SearchStrategy<P>,
{
    async fn insert(&self, entity: Entity<P>) -> RepositoryResult<()> {
        self.repository.insert(entity).await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Entity<P>> {
        self.repository.find_by_id(id).await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Entity<P>>> {
        self.repository.find_all().await
    }

    async fn update(&self, entity: Entity<P>) -> RepositoryResult<()> {
        self.repository.update(entity).await
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        self.repository.delete_by_id(id).await
    }
}

impl<P, S> SearchableRepository<P, SearchParams, SearchResult<Entity<P>>>
    for InMemorySearchableRepository<P, S>
where
    P: Clone + Send + Sync,
    S: SearchStrategy<P>,
{
    async fn search(&self, params: SearchParams) -> RepositoryResult<SearchResult<Entity<P>>> {
        let items = self
            .repository
            .find_all()
            .await
            .map_err(|error| error.with_operation(RepositoryOperation::Search))?;

        let filtered = self.apply_filter(items, params.filter());
        let total = filtered.len() as u64;
        let sorted = self.apply_sort(filtered, params.sort(), params.sort_dir());
        let page = self.apply_paginate(sorted, params.page(), params.per_page());

        tracing::debug!(
            entity_type = %self.repository.entity_type(),
            page = params.page(),
            per_page = params.per_page(),
            sort = ?params.sort(),
            filter = ?params.filter(),
            total,
            "search completed"
        );

        Ok(SearchResult::new(SearchResultProps {
            items: page,
            total,
            current_page: params.page(),
            per_page: params.per_page(),
            sort: params.sort().map(str::to_string),
            sort_dir: params.sort_dir(),
            filter: params.filter().map(str::to_string),
        }))
    }
}
