mod postgres;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::storage::DataStore;

use super::errors::UserError;
use super::types::{NewUser, User};

pub(crate) const DB_TABLE_USERS: &str = "users";

/// Durable keyed storage for [`User`] records.
pub struct UserStore {
    store: DataStore,
}

impl UserStore {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Create the users table if it does not exist yet.
    pub async fn init(&self) -> Result<(), UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::create_tables_sqlite(pool).await,
            DataStore::Postgres(pool) => postgres::create_tables_postgres(pool).await,
        }
    }

    /// Get a user by store-assigned identifier.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::get_user_sqlite(pool, id).await,
            DataStore::Postgres(pool) => postgres::get_user_postgres(pool, id).await,
        }
    }

    /// Get a user by email. The lookup is exact; emails are stored as
    /// provided with no normalization.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::get_user_by_email_sqlite(pool, email).await,
            DataStore::Postgres(pool) => postgres::get_user_by_email_postgres(pool, email).await,
        }
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::email_exists_sqlite(pool, email).await,
            DataStore::Postgres(pool) => postgres::email_exists_postgres(pool, email).await,
        }
    }

    /// Insert a new user and return the stored record with its assigned id.
    ///
    /// The unique constraint on `email` is the authoritative duplicate
    /// guard; a violation surfaces as [`UserError::Constraint`].
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::insert_user_sqlite(pool, new_user).await,
            DataStore::Postgres(pool) => postgres::insert_user_postgres(pool, new_user).await,
        }
    }

    /// Replace the stored password hash for `id`.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => {
                sqlite::update_password_sqlite(pool, id, password_hash).await
            }
            DataStore::Postgres(pool) => {
                postgres::update_password_postgres(pool, id, password_hash).await
            }
        }
    }

    /// Stamp the last successful authentication time for `id`.
    pub async fn update_last_login(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), UserError> {
        match &self.store {
            DataStore::Sqlite(pool) => sqlite::update_last_login_sqlite(pool, id, at).await,
            DataStore::Postgres(pool) => postgres::update_last_login_postgres(pool, id, at).await,
        }
    }
}
