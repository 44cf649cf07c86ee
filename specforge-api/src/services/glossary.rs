//! Glossary generation
//!
//! Builds a fresh glossary from the full requirement set and replaces the
//! stored one. Unlike stakeholder ranking there is no fallback: any model
//! or parse failure aborts the operation.

use sqlx::SqlitePool;
use std::sync::Arc;

use specforge_common::{Error, Result};

use crate::db;
use crate::models::{Glossary, GlossaryTerm};
use crate::services::extraction::extract_json;
use crate::services::gemini::TextGenerator;
use crate::services::prompts;

/// Glossary generation service
pub struct GlossaryService {
    db: SqlitePool,
    ai: Arc<dyn TextGenerator>,
}

impl GlossaryService {
    pub fn new(db: SqlitePool, ai: Arc<dyn TextGenerator>) -> Self {
        Self { db, ai }
    }

    /// Generate a glossary from all stored requirements and persist it
    ///
    /// With no requirements stored, the glossary is replaced with an empty
    /// term list without consulting the model.
    pub async fn generate_and_save(&self) -> Result<Glossary> {
        let requirements = db::requirements::find_all(&self.db).await?;

        let terms: Vec<GlossaryTerm> = if requirements.is_empty() {
            tracing::warn!("No requirements found for glossary generation");
            Vec::new()
        } else {
            let prompt = prompts::glossary_prompt(&requirements);
            let response = self.ai.generate(&prompt).await?;
            extract_json(&response).map_err(|e| Error::AiGeneration(e.to_string()))?
        };

        let glossary = db::glossary::replace(&self.db, terms).await?;

        tracing::info!(terms = glossary.terms.len(), "Glossary generated and saved");

        Ok(glossary)
    }
}
