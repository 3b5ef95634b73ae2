mod postgres;
mod sqlite;

use crate::storage::DataStore;

use super::errors::OAuth2Error;
use super::types::{LinkedIdentity, NewLinkedIdentity};

pub(crate) const DB_TABLE_LINKED_IDENTITIES: &str = "linked_identities";

/// Durable storage for [`LinkedIdentity`] records.
pub struct LinkedIdentityStore {
    store: DataStore,
}

impl LinkedIdentityStore {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Create the linked-identities table if it does not exist yet. The
    /// users table must exist first (foreign key).
    pub async fn init(&self) -> Result<(), OAuth2Error> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::create_tables_sqlite(pool).await,
            DataStore::Postgres(pool) => postgres::create_tables_postgres(pool).await,
        }
    }

    /// Look up the link for one `(provider, provider_user_id)` pair.
    pub async fn find_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<LinkedIdentity>, OAuth2Error> {
        match &self.store {
            DataStore::Sqlite(pool) => {
                sqlite::get_by_provider_sqlite(pool, provider, provider_user_id).await
            }
            DataStore::Postgres(pool) => {
                postgres::get_by_provider_postgres(pool, provider, provider_user_id).await
            }
        }
    }

    /// All links owned by one user.
    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<LinkedIdentity>, OAuth2Error> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::get_by_user_sqlite(pool, user_id).await,
            DataStore::Postgres(pool) => postgres::get_by_user_postgres(pool, user_id).await,
        }
    }

    /// Insert a new link. The `UNIQUE(provider, provider_user_id)`
    /// constraint surfaces duplicates as [`OAuth2Error::Constraint`].
    pub async fn create(
        &self,
        new_identity: NewLinkedIdentity,
    ) -> Result<LinkedIdentity, OAuth2Error> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::insert_sqlite(pool, new_identity).await,
            DataStore::Postgres(pool) => postgres::insert_postgres(pool, new_identity).await,
        }
    }
}
