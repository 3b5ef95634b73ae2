//! user-identity - Identity and session management library
//!
//! This crate registers local credentials, authenticates them, issues JWT
//! session tokens (access + refresh), and reconciles Google OAuth2
//! identities into the same user record space. Transport concerns (HTTP
//! routing, request binding, response rendering) stay with the caller:
//! operations take typed arguments and return typed results.
//!
//! ```no_run
//! use user_identity::{DataStore, IdentityConfig, IdentityCoordinator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DataStore::connect("sqlite:users.db").await?;
//! let coordinator = IdentityCoordinator::new(store, IdentityConfig::from_env()?);
//! coordinator.init().await?;
//!
//! let user = coordinator.register("Ada", "ada@example.com", "s3cret!").await?;
//! let (_user, tokens) = coordinator.login("ada@example.com", "s3cret!").await?;
//! let claims = coordinator.validate_session(&tokens.access_token)?;
//! assert_eq!(claims.user_id, user.id);
//! # Ok(())
//! # }
//! ```

mod config;
mod coordination;
mod oauth2;
mod password;
mod session;
mod storage;
#[cfg(test)]
mod test_utils;
mod userdb;

pub use config::{ConfigError, IdentityConfig};
pub use coordination::{CoordinationError, IdentityCoordinator};
pub use oauth2::{
    ExternalProfile, GoogleClient, LinkedIdentity, LinkedIdentityStore, NewLinkedIdentity,
    OAuth2Error, OAuth2ProviderConfig,
};
pub use password::{PasswordError, hash_password, verify_password};
pub use session::{SessionClaims, TokenConfig, TokenError, TokenKind, TokenPair, TokenService};
pub use storage::{DataStore, StorageError};
pub use userdb::{NewUser, Role, User, UserError, UserStore};
