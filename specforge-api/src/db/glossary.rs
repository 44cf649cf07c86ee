//! Glossary repository
//!
//! A single glossary document exists at a time. Replacement deletes the
//! previous glossary and inserts the new one inside one transaction, so
//! readers never observe a window with no glossary.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use specforge_common::{object_id, Error, Result};

use crate::models::{Glossary, GlossaryTerm};

/// Replace the stored glossary with a freshly generated one
pub async fn replace(pool: &SqlitePool, terms: Vec<GlossaryTerm>) -> Result<Glossary> {
    let now = Utc::now();
    let glossary = Glossary {
        id: object_id::generate(),
        terms,
        created_at: now,
        updated_at: now,
    };

    let terms_json = serde_json::to_string(&glossary.terms)
        .map_err(|e| Error::Internal(format!("Failed to serialize terms: {}", e)))?;
    let created_at = glossary.created_at.to_rfc3339();
    let updated_at = glossary.updated_at.to_rfc3339();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM glossaries").execute(&mut *tx).await?;

    sqlx::query(
        r#"
        INSERT INTO glossaries (id, terms, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&glossary.id)
    .bind(&terms_json)
    .bind(&created_at)
    .bind(&updated_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(glossary)
}

/// Fetch the current glossary, if one has been generated
pub async fn find_current(pool: &SqlitePool) -> Result<Option<Glossary>> {
    let row = sqlx::query(
        r#"
        SELECT id, terms, created_at, updated_at
        FROM glossaries
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let terms: String = row.get("terms");
    let terms = serde_json::from_str(&terms)
        .map_err(|e| Error::Internal(format!("Failed to deserialize terms: {}", e)))?;

    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    let updated_at: String = row.get("updated_at");
    let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| Error::Internal(format!("Failed to parse updated_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    Ok(Some(Glossary {
        id: row.get("id"),
        terms,
        created_at,
        updated_at,
    }))
}
