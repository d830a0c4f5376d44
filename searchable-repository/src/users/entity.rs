//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Properties of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProps {
    /// Display name, the field searched by filters
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Password hash
    pub password: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl UserProps {
    /// New user properties created now
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    /// Override the creation time, e.g. when restoring from storage
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A user account
pub type User = Entity<UserProps>;

impl Entity<UserProps> {
    /// Display name
    pub fn name(&self) -> &str {
        &self.props().name
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.props().email
    }

    /// Password hash
    pub fn password(&self) -> &str {
        &self.props().password
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.props().created_at
    }

    /// Rename the user
    pub fn update_name(&mut self, name: impl Into<String>) {
        self.props_mut().name = name.into();
    }

    /// Replace the stored password hash
    pub fn update_password(&mut self, password: impl Into<String>) {
        self.props_mut().password = password.into();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::user_props;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_has_id_and_creation_time() {
        let before = Utc::now();
        let user = User::new(UserProps::new("Jane Doe", "jane@example.com", "hash"));
        assert!(uuid::Uuid::parse_str(user.id()).is_ok());
        assert_eq!(user.name(), "Jane Doe");
        assert_eq!(user.email(), "jane@example.com");
        assert_eq!(user.password(), "hash");
        assert!(user.created_at() >= before);
    }

    #[test]
    fn test_update_name() {
        let mut user = User::new(user_props("before"));
        user.update_name("after");
        assert_eq!(user.name(), "after");
    }

    #[test]
    fn test_update_password() {
        let mut user = User::new(user_props("name"));
        user.update_password("new hash");
        assert_eq!(user.password(), "new hash");
    }

    #[test]
    fn test_to_json_uses_camel_case() {
        let created_at = "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let user = User::with_id(
            UserProps::new("Jane", "jane@example.com", "hash").with_created_at(created_at),
            "user-1",
        );
        assert_eq!(
            user.to_json(),
            json!({
                "id": "user-1",
                "name": "Jane",
                "email": "jane@example.com",
                "password": "hash",
                "createdAt": "2024-05-01T12:00:00Z",
            })
        );
    }
}
