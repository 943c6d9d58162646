//! Database bootstrap: pool construction and schema creation.
//!
//! Every table is created up front with `CREATE TABLE IF NOT EXISTS`, so a
//! fresh database file (or an in-memory database in tests) is usable without
//! an external migration step. Timestamps and ids are generated in Rust;
//! the schema carries no server-side defaults for them.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// One statement per table. Executed in order, so referenced tables exist
/// before their foreign keys do.
const SCHEMA: [&str; 6] = [
    "CREATE TABLE IF NOT EXISTS users (
        id              TEXT PRIMARY KEY,
        fullname        TEXT,
        username        TEXT NOT NULL UNIQUE,
        email           TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL,
        is_active       INTEGER NOT NULL DEFAULT 1,
        is_verified     INTEGER NOT NULL DEFAULT 0,
        is_superuser    INTEGER NOT NULL DEFAULT 0,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tasks (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT,
        status      TEXT NOT NULL,
        priority    TEXT NOT NULL,
        due_date    TEXT,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        owner_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS tags (
        id         TEXT PRIMARY KEY,
        title      TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        owner_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS task_tags (
        task_id TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
        tag_id  TEXT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (task_id, tag_id)
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id         TEXT PRIMARY KEY,
        comment    TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        owner_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        task_id    TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS reports (
        id              TEXT PRIMARY KEY,
        start_date      TEXT NOT NULL,
        end_date        TEXT NOT NULL,
        total_tasks     INTEGER NOT NULL,
        completed_tasks INTEGER NOT NULL,
        overdue_tasks   INTEGER NOT NULL,
        created_at      TEXT NOT NULL,
        owner_id        TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )",
];

/// Connects to the database at `database_url` and ensures the schema exists.
///
/// Foreign-key enforcement is switched on per connection; the cascade rules
/// on task deletion (comments, tag links) depend on it.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // A single connection keeps `sqlite::memory:` databases coherent across
    // the pool; SQLite serializes writes either way.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_connect_creates_schema() {
        let pool = connect("sqlite::memory:").await.unwrap();

        // Schema creation is idempotent against an already-initialized pool.
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }
}
