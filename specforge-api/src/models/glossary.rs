//! Glossary model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single glossary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub name: String,
    pub definition: String,
}

/// The glossary generated from the current requirement set
///
/// Exactly one glossary exists at a time; regeneration replaces the
/// previous one wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glossary {
    pub id: String,
    pub terms: Vec<GlossaryTerm>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
