use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Privilege level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Represents one local account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique across all users; stored exactly as provided.
    pub email: String,
    /// PHC-format Argon2id hash. Empty for accounts provisioned purely from
    /// an external identity (no local password set).
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    pub role: Role,
    /// Stamped on every successful password authentication.
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account carries a local credential at all.
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

/// Fields the caller supplies when creating a user; the store assigns the
/// identifier and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 7,
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            name: "A".to_string(),
            role: Role::User,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).expect("serialize user");
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("a@example.com"));
    }

    #[test]
    fn test_has_password() {
        let mut user = User {
            id: 1,
            email: "b@example.com".to_string(),
            password_hash: String::new(),
            name: "B".to_string(),
            role: Role::User,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!user.has_password());

        user.password_hash = "$argon2id$...".to_string();
        assert!(user.has_password());
    }
}
