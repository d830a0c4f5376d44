//! User repository contract and its in-memory implementation

use std::future::Future;

use crate::repository::{
    contains_ignore_case, FieldValue, InMemorySearchableRepository, RepositoryError,
    RepositoryErrorKind, RepositoryOperation, RepositoryResult, SearchParams, SearchResult,
    SearchStrategy, SearchableRepository, SortDirection,
};

use super::entity::{User, UserProps};

/// Search behavior for users
///
/// Filters on `name` (case-insensitive substring) and sorts on `name` or
/// `createdAt`. Searches without a sort field list the newest users first.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSearchStrategy;

impl SearchStrategy<UserProps> for UserSearchStrategy {
    fn sortable_fields(&self) -> &[&'static str] {
        &["name", "createdAt"]
    }

    fn field_value(&self, user: &User, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::from(user.name())),
            "createdAt" => Some(FieldValue::from(user.created_at())),
            _ => None,
        }
    }

    fn matches(&self, user: &User, filter: &str) -> bool {
        contains_ignore_case(user.name(), filter)
    }

    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        Some(("createdAt", SortDirection::Desc))
    }
}

/// Search result over users
pub type UserSearchResult = SearchResult<User>;

/// Repository contract for users
pub trait UserRepository: SearchableRepository<UserProps, SearchParams, UserSearchResult> {
    /// Find the user registered with `email`
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error (`Entity not found using email <email>`) if
    /// no user has this address.
    fn find_by_email(&self, email: &str) -> impl Future<Output = RepositoryResult<User>> + Send;

    /// Succeed only if no user is registered with `email`
    ///
    /// # Errors
    ///
    /// Returns a `Conflict` error (`Email address already used`) otherwise.
    fn email_exists(&self, email: &str) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// In-memory user repository
///
/// # Example
///
/// ```rust
/// use searchable_repository::repository::Repository;
/// use searchable_repository::users::{User, UserInMemoryRepository, UserProps, UserRepository};
///
/// # #[tokio::main]
/// # async fn main() {
/// let repository = UserInMemoryRepository::default();
/// let user = User::new(UserProps::new("Jane", "jane@example.com", "hash"));
/// repository.insert(user.clone()).await.unwrap();
///
/// assert_eq!(repository.find_by_email("jane@example.com").await.unwrap(), user);
/// assert!(repository.email_exists("jane@example.com").await.is_err());
/// # }
/// ```
pub type UserInMemoryRepository = InMemorySearchableRepository<UserProps, UserSearchStrategy>;

impl UserRepository for UserInMemoryRepository {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<User> {
        self.repository()
            .find_first(|user| user.email() == email)
            .await
            .ok_or_else(|| {
                RepositoryError::new(
                    RepositoryOperation::FindByEmail,
                    RepositoryErrorKind::NotFound,
                    format!("Entity not found using email {email}"),
                )
                .with_entity("User", email)
            })
    }

    async fn email_exists(&self, email: &str) -> RepositoryResult<()> {
        if self.repository().any(|user| user.email() == email).await {
            tracing::debug!(%email, "email address already registered");
            return Err(RepositoryError::conflict(
                RepositoryOperation::EmailExists,
                "Email address already used",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use crate::users::entity::testing::user_props;
    use chrono::{Duration, Utc};

    fn user(name: &str) -> User {
        User::new(user_props(name))
    }

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.name()).collect()
    }

    #[tokio::test]
    async fn test_find_by_email_not_found() {
        let repository = UserInMemoryRepository::default();
        let error = repository.find_by_email("a@a.com").await.unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(error.operation, RepositoryOperation::FindByEmail);
        assert_eq!(error.message, "Entity not found using email a@a.com");
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repository = UserInMemoryRepository::default();
        let entity = user("Jane");
        repository.insert(entity.clone()).await.unwrap();

        let found = repository.find_by_email(entity.email()).await.unwrap();
        assert_eq!(found.to_json(), entity.to_json());
    }

    #[tokio::test]
    async fn test_email_exists_conflict() {
        let repository = UserInMemoryRepository::default();
        let entity = user("Jane");
        repository.insert(entity.clone()).await.unwrap();

        let error = repository.email_exists(entity.email()).await.unwrap_err();
        assert!(error.is_conflict());
        assert_eq!(error.message, "Email address already used");
    }

    #[tokio::test]
    async fn test_email_exists_free_address() {
        let repository = UserInMemoryRepository::default();
        repository.insert(user("Jane")).await.unwrap();
        assert!(repository.email_exists("email@gmail.com").await.is_ok());
    }

    #[test]
    fn test_apply_filter_without_filter() {
        let repository = UserInMemoryRepository::default();
        let items = vec![user("Jane")];
        assert_eq!(repository.apply_filter(items.clone(), None), items);
    }

    #[test]
    fn test_apply_filter_on_name() {
        let repository = UserInMemoryRepository::default();
        let items = vec![user("Test1"), user("TEST"), user("Test"), user("Arapuca")];
        let filtered = repository.apply_filter(items.clone(), Some("TEST"));
        assert_eq!(filtered, items[..3].to_vec());
    }

    #[test]
    fn test_apply_sort_defaults_to_newest_first() {
        let repository = UserInMemoryRepository::default();
        let created_at = Utc::now();
        let items: Vec<User> = ["Test1", "TEST", "Test", "Arapuca"]
            .into_iter()
            .enumerate()
            .map(|(offset, name)| {
                let at = created_at + Duration::milliseconds(offset as i64);
                User::new(user_props(name).with_created_at(at))
            })
            .collect();

        let sorted = repository.apply_sort(items.clone(), None, None);
        let mut expected = items;
        expected.reverse();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_apply_sort_by_name() {
        let repository = UserInMemoryRepository::default();
        let items = vec![user("Test1"), user("TEST"), user("Test"), user("Arapuca")];

        let sorted = repository.apply_sort(items.clone(), Some("name"), Some(SortDirection::Asc));
        assert_eq!(names(&sorted), vec!["Arapuca", "TEST", "Test", "Test1"]);

        let sorted = repository.apply_sort(items, Some("name"), None);
        assert_eq!(names(&sorted), vec!["Test1", "Test", "TEST", "Arapuca"]);
    }

    #[tokio::test]
    async fn test_search_lists_newest_first() {
        let repository = UserInMemoryRepository::default();
        let created_at = Utc::now();
        for (offset, name) in ["a", "b", "c"].into_iter().enumerate() {
            let at = created_at + Duration::seconds(offset as i64);
            let props = user_props(name).with_created_at(at);
            repository.insert(User::new(props)).await.unwrap();
        }

        let result = repository.search(SearchParams::new()).await.unwrap();
        assert_eq!(names(result.items()), vec!["c", "b", "a"]);
        assert_eq!(result.sort(), None);
        assert_eq!(result.total(), 3);
    }
}
