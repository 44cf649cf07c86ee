//! Wiegers matrix repository

use sqlx::{Row, SqlitePool};
use specforge_common::{Error, Result};

use crate::models::WiegersMatrixEntry;

/// Insert a single matrix entry
pub async fn insert(pool: &SqlitePool, entry: &WiegersMatrixEntry) -> Result<()> {
    let created_at = entry.created_at.to_rfc3339();
    let updated_at = entry.updated_at.to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO wiegers_matrices (
            id, requirement_id, requirement_title,
            value, cost, risk, urgency, priority,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.id)
    .bind(&entry.requirement_id)
    .bind(&entry.requirement_title)
    .bind(entry.value)
    .bind(entry.cost)
    .bind(entry.risk)
    .bind(entry.urgency)
    .bind(entry.priority)
    .bind(&created_at)
    .bind(&updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch all matrix entries, highest priority first
///
/// Equal priorities keep insertion order (rowid).
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<WiegersMatrixEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, requirement_id, requirement_title,
               value, cost, risk, urgency, priority,
               created_at, updated_at
        FROM wiegers_matrices
        ORDER BY priority DESC, rowid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_entry).collect()
}

/// Fetch the matrix entry for a requirement, if one exists
pub async fn find_by_requirement_id(
    pool: &SqlitePool,
    requirement_id: &str,
) -> Result<Option<WiegersMatrixEntry>> {
    let row = sqlx::query(
        r#"
        SELECT id, requirement_id, requirement_title,
               value, cost, risk, urgency, priority,
               created_at, updated_at
        FROM wiegers_matrices
        WHERE requirement_id = ?
        "#,
    )
    .bind(requirement_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_entry).transpose()
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<WiegersMatrixEntry> {
    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    let updated_at: String = row.get("updated_at");
    let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| Error::Internal(format!("Failed to parse updated_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    Ok(WiegersMatrixEntry {
        id: row.get("id"),
        requirement_id: row.get("requirement_id"),
        requirement_title: row.get("requirement_title"),
        value: row.get("value"),
        cost: row.get("cost"),
        risk: row.get("risk"),
        urgency: row.get("urgency"),
        priority: row.get("priority"),
        created_at,
        updated_at,
    })
}
