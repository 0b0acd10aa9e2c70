use sqlx::Pool;

use crate::error::CustomError;

const SQLITE_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS predictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        gender TEXT NOT NULL,
        year TEXT NOT NULL,
        lifestyle TEXT NOT NULL,
        accommodation_type TEXT NOT NULL,
        finance_sources TEXT NOT NULL,
        earn_income TEXT NOT NULL,
        predicted_cost REAL NOT NULL,
        created_at TEXT NOT NULL
    )"#,
];

const POSTGRES_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS predictions (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        gender TEXT NOT NULL,
        year TEXT NOT NULL,
        lifestyle TEXT NOT NULL,
        accommodation_type TEXT NOT NULL,
        finance_sources TEXT NOT NULL,
        earn_income TEXT NOT NULL,
        predicted_cost DOUBLE PRECISION NOT NULL,
        created_at TEXT NOT NULL
    )"#,
];

pub struct Database;

impl Database {
    pub async fn new_pool(url: &str) -> Result<Pool<sqlx::Any>, CustomError> {
        sqlx::any::install_default_drivers();
        sqlx::any::AnyPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .idle_timeout(std::time::Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(CustomError::DBError)
    }

    /// Creates the `users` and `predictions` tables if they are absent.
    pub async fn init_schema(pool: &Pool<sqlx::Any>, url: &str) -> Result<(), CustomError> {
        let statements = if url.starts_with("postgres") {
            POSTGRES_SCHEMA
        } else {
            SQLITE_SCHEMA
        };
        for statement in statements {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(CustomError::DBError)?;
        }
        Ok(())
    }
}
