//! Database access for the SpecForge backend
//!
//! SQLite-backed document storage: one table per collection, nested values
//! serialized as JSON text. Access is limited to insert-one, find-one and
//! find-many-sorted operations; nothing updates rows in place.

pub mod glossary;
pub mod requirements;
pub mod wiegers;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create collection tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS requirements (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            details TEXT,
            stakeholders TEXT NOT NULL,
            requirement_type TEXT NOT NULL,
            attributes TEXT NOT NULL,
            version TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wiegers_matrices (
            id TEXT PRIMARY KEY,
            requirement_id TEXT NOT NULL,
            requirement_title TEXT NOT NULL,
            value INTEGER NOT NULL,
            cost INTEGER NOT NULL,
            risk INTEGER NOT NULL,
            urgency INTEGER NOT NULL,
            priority REAL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS glossaries (
            id TEXT PRIMARY KEY,
            terms TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (requirements, wiegers_matrices, glossaries)");

    Ok(())
}
