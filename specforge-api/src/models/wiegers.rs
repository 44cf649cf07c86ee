//! Wiegers matrix entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scored requirement in the Wiegers prioritization matrix
///
/// Each scoring run produces fresh entries; entries are never updated in
/// place. `priority` holds `(value + urgency) - (cost + risk)` once computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiegersMatrixEntry {
    /// Document identifier, distinct from the requirement's id
    pub id: String,
    /// Scored requirement (foreign reference, not ownership)
    pub requirement_id: String,
    /// Title snapshot taken at scoring time
    pub requirement_title: String,
    /// Value to the user (1-5)
    pub value: i64,
    /// Implementation cost (1-5)
    pub cost: i64,
    /// Technical risk (1-5)
    pub risk: i64,
    /// Urgency (1-5)
    pub urgency: i64,
    /// Computed priority, in [-8, 8]
    pub priority: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
