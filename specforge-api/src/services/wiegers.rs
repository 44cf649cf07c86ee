//! Wiegers matrix scoring and rating generation
//!
//! The scoring formula is pure arithmetic; rating generation resolves the
//! requested requirements, asks the model for [1,5] ratings, validates the
//! whole batch, and only then persists entries in model output order.

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::sync::Arc;

use specforge_common::{object_id, Error, Result};

use crate::db;
use crate::models::WiegersMatrixEntry;
use crate::services::extraction::extract_json;
use crate::services::gemini::TextGenerator;
use crate::services::prompts;

/// Wiegers priority formula: `(value + urgency) - (cost + risk)`
///
/// Pure arithmetic over already-validated inputs; stored as a float because
/// downstream consumers expect one. For inputs in [1,5] the result lies in
/// [-8, 8].
pub fn compute_priority(value: i64, cost: i64, risk: i64, urgency: i64) -> f64 {
    ((value + urgency) - (cost + risk)) as f64
}

/// One rated requirement as returned by the model
#[derive(Debug, Deserialize)]
struct RatingEntry {
    requirement_id: String,
    requirement_title: String,
    value: i64,
    cost: i64,
    risk: i64,
    urgency: i64,
}

impl RatingEntry {
    /// Every rating must be an integer in [1,5]
    fn validate(&self) -> Result<()> {
        for (name, rating) in [
            ("value", self.value),
            ("cost", self.cost),
            ("risk", self.risk),
            ("urgency", self.urgency),
        ] {
            if !(1..=5).contains(&rating) {
                return Err(Error::AiGeneration(format!(
                    "rating '{}' for requirement {} out of range [1,5]: {}",
                    name, self.requirement_id, rating
                )));
            }
        }
        Ok(())
    }
}

/// Rating generation pipeline
pub struct WiegersService {
    db: SqlitePool,
    ai: Arc<dyn TextGenerator>,
}

impl WiegersService {
    pub fn new(db: SqlitePool, ai: Arc<dyn TextGenerator>) -> Self {
        Self { db, ai }
    }

    /// Generate and persist matrix entries for the given requirement ids
    ///
    /// Ids that match no stored requirement are skipped; an entirely
    /// unresolved list is `NotFound`. The batch is all-or-nothing: the
    /// model response is parsed and validated in full before the first
    /// entry is written.
    pub async fn generate_ratings(
        &self,
        requirement_ids: &[String],
    ) -> Result<Vec<WiegersMatrixEntry>> {
        // Resolve ids one at a time; malformed ids fail, unknown ids are skipped
        let mut requirements = Vec::new();
        for id in requirement_ids {
            if let Some(requirement) = db::requirements::find_by_id(&self.db, id).await? {
                requirements.push(requirement);
            }
        }

        if requirements.is_empty() {
            return Err(Error::NotFound(
                "no requirements found for the given ids".to_string(),
            ));
        }

        tracing::info!(count = requirements.len(), "Generating Wiegers ratings");

        let prompt = prompts::rating_prompt(&requirements);
        let response = self.ai.generate(&prompt).await?;

        let entries: Vec<RatingEntry> = extract_json(&response)
            .map_err(|e| Error::AiGeneration(e.to_string()))?;

        for entry in &entries {
            entry.validate()?;
        }

        // Persist in model output order
        let now = Utc::now();
        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let matrix_entry = WiegersMatrixEntry {
                id: object_id::generate(),
                requirement_id: entry.requirement_id,
                requirement_title: entry.requirement_title,
                value: entry.value,
                cost: entry.cost,
                risk: entry.risk,
                urgency: entry.urgency,
                priority: Some(compute_priority(
                    entry.value,
                    entry.cost,
                    entry.risk,
                    entry.urgency,
                )),
                created_at: now,
                updated_at: now,
            };
            db::wiegers::insert(&self.db, &matrix_entry).await?;
            created.push(matrix_entry);
        }

        tracing::info!(count = created.len(), "Wiegers ratings persisted");

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_formula() {
        assert_eq!(compute_priority(2, 1, 3, 5), 3.0);
        assert_eq!(compute_priority(1, 1, 1, 1), 0.0);
        assert_eq!(compute_priority(5, 1, 1, 5), 8.0);
        assert_eq!(compute_priority(1, 5, 5, 1), -8.0);
    }

    #[test]
    fn priority_stays_in_range_over_full_domain() {
        for v in 1..=5 {
            for c in 1..=5 {
                for r in 1..=5 {
                    for u in 1..=5 {
                        let p = compute_priority(v, c, r, u);
                        assert_eq!(p, ((v + u) - (c + r)) as f64);
                        assert!((-8.0..=8.0).contains(&p));
                    }
                }
            }
        }
    }

    #[test]
    fn rating_entry_range_validation() {
        let entry = RatingEntry {
            requirement_id: "aaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            requirement_title: "User login".to_string(),
            value: 3,
            cost: 2,
            risk: 4,
            urgency: 5,
        };
        assert!(entry.validate().is_ok());

        let out_of_range = RatingEntry { value: 0, ..entry };
        assert!(matches!(out_of_range.validate(), Err(Error::AiGeneration(_))));

        let out_of_range = RatingEntry {
            urgency: 6,
            value: 3,
            requirement_id: "aaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            requirement_title: "User login".to_string(),
            cost: 2,
            risk: 4,
        };
        assert!(matches!(out_of_range.validate(), Err(Error::AiGeneration(_))));
    }

    #[test]
    fn rating_entry_rejects_missing_keys() {
        let result: std::result::Result<Vec<RatingEntry>, _> = serde_json::from_str(
            r#"[{"requirement_id": "a", "requirement_title": "t", "value": 3, "cost": 2, "risk": 4}]"#,
        );
        assert!(result.is_err());
    }
}
