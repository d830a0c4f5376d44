//! In-memory repository
//!
//! Ordered storage behind a single async [`RwLock`], with an id index for
//! identity lookups. Every mutation takes the write lock once, so concurrent
//! callers never observe a half-applied change.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{Repository, RepositoryResult};
use crate::entity::Entity;

/// Entity type label used in errors when none is configured
const DEFAULT_ENTITY_TYPE: &str = "Entity";

struct Store<P> {
    items: Vec<Entity<P>>,
    index: HashMap<String, usize>,
}

impl<P> Store<P> {
    fn new(items: Vec<Entity<P>>) -> Self {
        let mut store = Self {
            items,
            index: HashMap::new(),
        };
        store.reindex();
        store
    }

    // First occurrence wins when ids repeat.
    fn reindex(&mut self) {
        self.index.clear();
        for (position, entity) in self.items.iter().enumerate() {
            self.index.entry(entity.id().to_string()).or_insert(position);
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn push(&mut self, entity: Entity<P>) {
        self.index
            .entry(entity.id().to_string())
            .or_insert(self.items.len());
        self.items.push(entity);
    }

    fn remove(&mut self, position: usize) -> Entity<P> {
        let removed = self.items.remove(position);
        self.reindex();
        removed
    }
}

/// Repository keeping entities in insertion order in process memory
///
/// # Example
///
/// ```rust
/// use searchable_repository::entity::Entity;
/// use searchable_repository::repository::{InMemoryRepository, Repository};
///
/// # #[tokio::main]
/// # async fn main() {
/// let repository = InMemoryRepository::new();
/// let entity = Entity::with_id("props".to_string(), "1");
/// repository.insert(entity.clone()).await.unwrap();
///
/// assert_eq!(repository.find_by_id("1").await.unwrap(), entity);
/// assert!(repository.find_by_id("2").await.unwrap_err().is_not_found());
/// # }
/// ```
pub struct InMemoryRepository<P> {
    store: RwLock<Store<P>>,
    entity_type: String,
}

impl<P> InMemoryRepository<P> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    /// Create a repository pre-populated with `items`, in order
    pub fn from_items(items: Vec<Entity<P>>) -> Self {
        Self {
            store: RwLock::new(Store::new(items)),
            entity_type: DEFAULT_ENTITY_TYPE.to_string(),
        }
    }

    /// Set the entity type label reported in errors
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = entity_type.into();
        self
    }

    /// Entity type label reported in errors
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Number of stored entities
    pub async fn len(&self) -> usize {
        self.store.read().await.items.len()
    }

    /// Whether the repository holds no entities
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.items.is_empty()
    }

    /// Replace the whole contents, rebuilding the id index
    pub async fn replace_all(&self, items: Vec<Entity<P>>) {
        *self.store.write().await = Store::new(items);
    }

    /// Return the first stored entity satisfying `predicate`
    pub async fn find_first<F>(&self, predicate: F) -> Option<Entity<P>>
    where
        P: Clone,
        F: Fn(&Entity<P>) -> bool,
    {
        self.store
            .read()
            .await
            .items
            .iter()
            .find(|entity| predicate(entity))
            .cloned()
    }

    /// Whether any stored entity satisfies `predicate`
    pub async fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Entity<P>) -> bool,
    {
        self.store.read().await.items.iter().any(predicate)
    }

    fn not_found(&self, id: &str, operation: RepositoryOperation) -> RepositoryError {
        RepositoryError::not_found(self.entity_type.as_str(), id).with_operation(operation)
    }
}

impl<P> Default for InMemoryRepository<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Repository<P> for InMemoryRepository<P>
where
    P: Clone + Send + Sync,
{
    async fn insert(&self, entity: Entity<P>) -> RepositoryResult<()> {
        tracing::debug!(entity_type = %self.entity_type, entity_id = %entity.id(), "inserting entity");
        self.store.write().await.push(entity);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Entity<P>> {
        let store = self.store.read().await;
        store
            .position(id)
            .map(|position| store.items[position].clone())
            .ok_or_else(|| self.not_found(id, RepositoryOperation::FindById))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Entity<P>>> {
        Ok(self.store.read().await.items.clone())
    }

    async fn update(&self, entity: Entity<P>) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let Some(position) = store.position(entity.id()) else {
            return Err(self.not_found(entity.id(), RepositoryOperation::Update));
        };
        tracing::debug!(entity_type = %self.entity_type, entity_id = %entity.id(), "updating entity");
        store.items[position] = entity;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let Some(position) = store.position(id) else {
            return Err(self.not_found(id, RepositoryOperation::DeleteById));
        };
        store.remove(position);
        tracing::debug!(entity_type = %self.entity_type, entity_id = %id, "deleted entity");
        Ok(())
    }
}
