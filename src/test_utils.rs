//! Shared test helpers: isolated in-memory stores and environment guards.

use std::env;

use crate::config::IdentityConfig;
use crate::coordination::IdentityCoordinator;
use crate::oauth2::OAuth2ProviderConfig;
use crate::session::TokenConfig;
use crate::storage::DataStore;

/// Restores an environment variable to its previous state on drop.
pub(crate) struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    pub(crate) fn set(key: &str, value: &str) -> Self {
        let original = env::var(key).ok();
        // Env manipulation mutates process-global state; the tests using
        // these guards run under #[serial].
        unsafe {
            env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            original,
        }
    }

    pub(crate) fn unset(key: &str) -> Self {
        let original = env::var(key).ok();
        unsafe {
            env::remove_var(key);
        }
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(value) => env::set_var(&self.key, value),
                None => env::remove_var(&self.key),
            }
        }
    }
}

/// A fresh single-connection in-memory SQLite store, isolated per test.
pub(crate) async fn memory_store() -> DataStore {
    DataStore::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect")
}

pub(crate) fn test_config() -> IdentityConfig {
    IdentityConfig {
        token: TokenConfig::new("test-signing-secret"),
        provider: OAuth2ProviderConfig::new(
            "test-client-id",
            "test-client-secret",
            "http://127.0.0.1:3000/auth/google/callback",
        ),
    }
}

/// A coordinator over a fresh in-memory store with tables created.
pub(crate) async fn test_coordinator() -> IdentityCoordinator {
    let coordinator = IdentityCoordinator::new(memory_store().await, test_config());
    coordinator.init().await.expect("store init");
    coordinator
}
