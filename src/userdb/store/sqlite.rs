use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::userdb::errors::UserError;
use crate::userdb::types::{NewUser, User};

use super::DB_TABLE_USERS;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_USERS} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            role TEXT NOT NULL,
            last_login TIMESTAMP,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn get_user_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<Option<User>, UserError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {DB_TABLE_USERS} WHERE id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub(super) async fn get_user_by_email_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<User>, UserError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {DB_TABLE_USERS} WHERE email = ?
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub(super) async fn email_exists_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<bool, UserError> {
    let exists = sqlx::query_scalar::<_, bool>(&format!(
        r#"
        SELECT EXISTS(SELECT 1 FROM {DB_TABLE_USERS} WHERE email = ?)
        "#
    ))
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    new_user: NewUser,
) -> Result<User, UserError> {
    let now = Utc::now();

    let result = sqlx::query(&format!(
        r#"
        INSERT INTO {DB_TABLE_USERS} (email, password_hash, name, role, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.name)
    .bind(new_user.role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        email: new_user.email,
        password_hash: new_user.password_hash,
        name: new_user.name,
        role: new_user.role,
        last_login: None,
        created_at: now,
        updated_at: now,
    })
}

pub(super) async fn update_password_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
    password_hash: &str,
) -> Result<(), UserError> {
    let result = sqlx::query(&format!(
        r#"
        UPDATE {DB_TABLE_USERS} SET password_hash = ?, updated_at = ? WHERE id = ?
        "#
    ))
    .bind(password_hash)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(UserError::NotFound);
    }

    Ok(())
}

pub(super) async fn update_last_login_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
    at: DateTime<Utc>,
) -> Result<(), UserError> {
    let result = sqlx::query(&format!(
        r#"
        UPDATE {DB_TABLE_USERS} SET last_login = ? WHERE id = ?
        "#
    ))
    .bind(at)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(UserError::NotFound);
    }

    Ok(())
}
