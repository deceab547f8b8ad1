use std::fmt;

use serde::{Deserialize, Serialize};

use super::{require_non_empty, Validate};
use crate::storage::{prefix_matches, Entity, EntityId};

/// Account that can log in.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier
    pub user_id: EntityId,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Free-form role
    pub role: String,
    /// Login secret. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Create/update body for [`User`].
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Login name
    pub username: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Login secret
    pub password: String,
    /// Free-form role
    #[serde(default)]
    pub role: String,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

/// List query for [`User`]: prefix match on each given field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserFilter {
    /// Username prefix
    pub username: Option<String>,
    /// Email prefix
    pub email: Option<String>,
    /// Role prefix
    pub role: Option<String>,
}

impl Entity for User {
    type Draft = UserDraft;
    type Filter = UserFilter;

    const NAME: &'static str = "User";

    fn id(&self) -> EntityId {
        self.user_id
    }

    fn from_draft(id: EntityId, draft: UserDraft) -> Self {
        Self {
            user_id: id,
            username: draft.username,
            email: draft.email,
            role: draft.role,
            password: draft.password,
        }
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        prefix_matches(&self.username, filter.username.as_ref())
            && prefix_matches(&self.email, filter.email.as_ref())
            && prefix_matches(&self.role, filter.role.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::from_draft(
            1,
            UserDraft {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "hunter2".to_string(),
                role: "admin".to_string(),
            },
        )
    }

    #[test]
    fn test_password_is_write_only() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": 1,
                "username": "alice",
                "email": "alice@example.com",
                "role": "admin",
            })
        );
        assert!(!format!("{:?}", alice()).contains("hunter2"));
    }

    #[test]
    fn test_draft_requires_username_and_password() {
        let draft: UserDraft =
            serde_json::from_value(serde_json::json!({"username": "bob", "password": ""})).unwrap();
        assert_eq!(draft.validate().unwrap_err(), "password is required");
        assert!(serde_json::from_value::<UserDraft>(serde_json::json!({"username": "bob"})).is_err());
    }

    #[test]
    fn test_filter_prefixes() {
        let user = alice();
        let filter = UserFilter {
            username: Some("al".to_string()),
            role: Some("adm".to_string()),
            ..UserFilter::default()
        };
        assert!(user.matches(&filter));
        assert!(!user.matches(&UserFilter {
            email: Some("bob".to_string()),
            ..UserFilter::default()
        }));
    }
}
