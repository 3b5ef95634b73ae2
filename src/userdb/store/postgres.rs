use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::userdb::errors::UserError;
use crate::userdb::types::{NewUser, User};

use super::DB_TABLE_USERS;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_USERS} (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            role TEXT NOT NULL,
            last_login TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn get_user_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<User>, UserError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {DB_TABLE_USERS} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub(super) async fn get_user_by_email_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<User>, UserError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {DB_TABLE_USERS} WHERE email = $1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub(super) async fn email_exists_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<bool, UserError> {
    let exists = sqlx::query_scalar::<_, bool>(&format!(
        r#"
        SELECT EXISTS(SELECT 1 FROM {DB_TABLE_USERS} WHERE email = $1)
        "#
    ))
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    new_user: NewUser,
) -> Result<User, UserError> {
    let now = Utc::now();

    let id = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        INSERT INTO {DB_TABLE_USERS} (email, password_hash, name, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#
    ))
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.name)
    .bind(new_user.role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(User {
        id,
        email: new_user.email,
        password_hash: new_user.password_hash,
        name: new_user.name,
        role: new_user.role,
        last_login: None,
        created_at: now,
        updated_at: now,
    })
}

pub(super) async fn update_password_postgres(
    pool: &Pool<Postgres>,
    id: i64,
    password_hash: &str,
) -> Result<(), UserError> {
    let result = sqlx::query(&format!(
        r#"
        UPDATE {DB_TABLE_USERS} SET password_hash = $1, updated_at = $2 WHERE id = $3
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

pub(super) async fn update_last_login_postgres(
    pool: &Pool<Postgres>,
    id: i64,
    at: DateTime<Utc>,
) -> Result<(), UserError> {
    let result = sqlx::query(&format!(
        r#"
        UPDATE {DB_TABLE_USERS} SET last_login = $1 WHERE id = $2
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
