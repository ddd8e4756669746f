use anyhow::Result;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::str::FromStr;

use crate::auth::{Permission, User};

/// Creates an in-memory SQLite pool for testing
pub async fn create_test_pool() -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory databases should use a single connection
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// A staff member allowed to manage products
pub fn staff_user() -> User {
    User::new("staff@example.com", vec![Permission::ManageProducts])
}

/// An authenticated account without any permissions
pub fn customer_user() -> User {
    User::new("customer@example.com", Vec::new())
}
