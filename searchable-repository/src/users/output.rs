//! User output DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::{PaginationOutput, PaginationOutputMapper};
use crate::repository::SearchResult;

use super::entity::User;

/// Public view of a user
///
/// Serializes to the same shape as [`Entity::to_json`](crate::entity::Entity::to_json)
/// on a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOutput {
    /// Entity identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password hash as stored
    pub password: String,
    /// Creation timestamp, serialized as `createdAt`
    pub created_at: DateTime<Utc>,
}

/// Paginated list of users
pub type ListUsersOutput = PaginationOutput<UserOutput>;

/// Maps user entities to [`UserOutput`]
pub struct UserOutputMapper;

impl UserOutputMapper {
    /// Convert one user
    pub fn to_output(user: &User) -> UserOutput {
        let props = user.props();
        UserOutput {
            id: user.id().to_string(),
            name: props.name.clone(),
            email: props.email.clone(),
            password: props.password.clone(),
            created_at: props.created_at,
        }
    }

    /// Convert a user search into the paginated listing shape
    pub fn to_list_output(result: &SearchResult<User>) -> ListUsersOutput {
        PaginationOutputMapper::map_output(result, Self::to_output)
    }
}

impl From<&User> for UserOutput {
    fn from(user: &User) -> Self {
        UserOutputMapper::to_output(user)
    }
}
