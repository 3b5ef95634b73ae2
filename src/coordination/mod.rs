mod auth;
mod errors;
mod oauth2;

pub use errors::CoordinationError;

use crate::config::IdentityConfig;
use crate::oauth2::{GoogleClient, LinkedIdentityStore};
use crate::session::{SessionClaims, TokenError, TokenService};
use crate::storage::DataStore;
use crate::userdb::UserStore;

/// The identity and session manager.
///
/// Composes the user store, linked-identity store, token service, and
/// external identity client. Each operation is a one-shot transaction
/// against the stores; the coordinator holds no mutable state and is safe
/// for concurrent use across requests.
pub struct IdentityCoordinator {
    users: UserStore,
    identities: LinkedIdentityStore,
    tokens: TokenService,
    google: GoogleClient,
}

impl IdentityCoordinator {
    pub fn new(store: DataStore, config: IdentityConfig) -> Self {
        Self {
            users: UserStore::new(store.clone()),
            identities: LinkedIdentityStore::new(store),
            tokens: TokenService::new(&config.token),
            google: GoogleClient::new(config.provider),
        }
    }

    /// Bootstrap the underlying store tables.
    pub async fn init(&self) -> Result<(), CoordinationError> {
        self.users.init().await?;
        self.identities.init().await?;
        Ok(())
    }

    /// Validate a session token on behalf of the request-authorization
    /// layer.
    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.tokens.validate(token)
    }
}
