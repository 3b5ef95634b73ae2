use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{LinkedIdentity, NewLinkedIdentity};
use crate::userdb::DB_TABLE_USERS;

use super::DB_TABLE_LINKED_IDENTITIES;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), OAuth2Error> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_LINKED_IDENTITIES} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES {DB_TABLE_USERS}(id),
            provider TEXT NOT NULL,
            provider_user_id TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            UNIQUE(provider, provider_user_id)
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE INDEX IF NOT EXISTS idx_{DB_TABLE_LINKED_IDENTITIES}_user_id
        ON {DB_TABLE_LINKED_IDENTITIES}(user_id)
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn get_by_provider_sqlite(
    pool: &Pool<Sqlite>,
    provider: &str,
    provider_user_id: &str,
) -> Result<Option<LinkedIdentity>, OAuth2Error> {
    let identity = sqlx::query_as::<_, LinkedIdentity>(&format!(
        r#"
        SELECT * FROM {DB_TABLE_LINKED_IDENTITIES}
        WHERE provider = ? AND provider_user_id = ?
        "#
    ))
    .bind(provider)
    .bind(provider_user_id)
    .fetch_optional(pool)
    .await?;

    Ok(identity)
}

pub(super) async fn get_by_user_sqlite(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<LinkedIdentity>, OAuth2Error> {
    let identities = sqlx::query_as::<_, LinkedIdentity>(&format!(
        r#"
        SELECT * FROM {DB_TABLE_LINKED_IDENTITIES} WHERE user_id = ?
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(identities)
}

pub(super) async fn insert_sqlite(
    pool: &Pool<Sqlite>,
    new_identity: NewLinkedIdentity,
) -> Result<LinkedIdentity, OAuth2Error> {
    let now = Utc::now();

    let result = sqlx::query(&format!(
        r#"
        INSERT INTO {DB_TABLE_LINKED_IDENTITIES}
            (user_id, provider, provider_user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#
    ))
    .bind(new_identity.user_id)
    .bind(&new_identity.provider)
    .bind(&new_identity.provider_user_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(LinkedIdentity {
        id: result.last_insert_rowid(),
        user_id: new_identity.user_id,
        provider: new_identity.provider,
        provider_user_id: new_identity.provider_user_id,
        created_at: now,
        updated_at: now,
    })
}
