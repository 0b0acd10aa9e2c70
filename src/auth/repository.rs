use crate::error::CustomError;

use super::model::{Account, NewAccount};

pub struct AccountRepository {
    pool: sqlx::AnyPool,
}

impl AccountRepository {
    pub fn new(pool: sqlx::AnyPool) -> Self {
        AccountRepository { pool }
    }

    pub async fn insert_account(&self, new_account: &NewAccount) -> Result<i64, CustomError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id"#,
        )
        .bind(&new_account.name)
        .bind(&new_account.email)
        .bind(&new_account.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(err) if err.is_unique_violation() => CustomError::EmailExists,
            e => CustomError::DBError(e),
        })?;

        Ok(row.0)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Account, CustomError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Account, CustomError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found)
    }

    pub async fn count(&self) -> Result<i64, CustomError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(CustomError::DBError)?;
        Ok(row.0)
    }
}

fn not_found(e: sqlx::Error) -> CustomError {
    match e {
        sqlx::Error::RowNotFound => CustomError::AccountNotFound,
        _ => CustomError::DBError(e),
    }
}
