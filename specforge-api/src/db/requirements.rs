//! Requirement repository
//!
//! Documents are created once and never updated; reads return them in
//! insertion order.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use specforge_common::{object_id, Error, Result};

use crate::models::{Requirement, RequirementDto};

/// Insert a new requirement and return the stored document
pub async fn insert(pool: &SqlitePool, dto: &RequirementDto) -> Result<Requirement> {
    let requirement = Requirement {
        id: object_id::generate(),
        title: dto.title.clone(),
        description: dto.description.clone(),
        details: dto.details.clone(),
        stakeholders: dto.stakeholders.clone(),
        requirement_type: dto.requirement_type,
        attributes: dto.attributes.clone(),
        version: dto.version.clone(),
        status: dto.status,
        created_at: Utc::now(),
    };

    // Prepare all data before touching the connection
    let stakeholders = serde_json::to_string(&requirement.stakeholders)
        .map_err(|e| Error::Internal(format!("Failed to serialize stakeholders: {}", e)))?;
    let requirement_type = serde_json::to_string(&requirement.requirement_type)
        .map_err(|e| Error::Internal(format!("Failed to serialize type: {}", e)))?;
    let attributes = serde_json::to_string(&requirement.attributes)
        .map_err(|e| Error::Internal(format!("Failed to serialize attributes: {}", e)))?;
    let status = serde_json::to_string(&requirement.status)
        .map_err(|e| Error::Internal(format!("Failed to serialize status: {}", e)))?;
    let created_at = requirement.created_at.to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO requirements (
            id, title, description, details, stakeholders,
            requirement_type, attributes, version, status, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&requirement.id)
    .bind(&requirement.title)
    .bind(&requirement.description)
    .bind(&requirement.details)
    .bind(&stakeholders)
    .bind(&requirement_type)
    .bind(&attributes)
    .bind(&requirement.version)
    .bind(&status)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(requirement)
}

/// Fetch all requirements in insertion order
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Requirement>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, description, details, stakeholders,
               requirement_type, attributes, version, status, created_at
        FROM requirements
        ORDER BY rowid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_requirement).collect()
}

/// Fetch a requirement by its document identifier
///
/// A malformed identifier is an `InvalidInput` error, distinct from a
/// well-formed identifier that matches nothing (`Ok(None)`).
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Requirement>> {
    if !object_id::is_valid(id) {
        return Err(Error::InvalidInput(format!(
            "Invalid requirement id format: {}",
            id
        )));
    }

    let row = sqlx::query(
        r#"
        SELECT id, title, description, details, stakeholders,
               requirement_type, attributes, version, status, created_at
        FROM requirements
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_requirement).transpose()
}

fn row_to_requirement(row: &sqlx::sqlite::SqliteRow) -> Result<Requirement> {
    let stakeholders: String = row.get("stakeholders");
    let stakeholders = serde_json::from_str(&stakeholders)
        .map_err(|e| Error::Internal(format!("Failed to deserialize stakeholders: {}", e)))?;

    let requirement_type: String = row.get("requirement_type");
    let requirement_type = serde_json::from_str(&requirement_type)
        .map_err(|e| Error::Internal(format!("Failed to deserialize type: {}", e)))?;

    let attributes: String = row.get("attributes");
    let attributes = serde_json::from_str(&attributes)
        .map_err(|e| Error::Internal(format!("Failed to deserialize attributes: {}", e)))?;

    let status: String = row.get("status");
    let status = serde_json::from_str(&status)
        .map_err(|e| Error::Internal(format!("Failed to deserialize status: {}", e)))?;

    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    Ok(Requirement {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        details: row.get("details"),
        stakeholders,
        requirement_type,
        attributes,
        version: row.get("version"),
        status,
        created_at,
    })
}
