//! Requirement model and create DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use specforge_common::{Error, Result};

/// Requirement classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementType {
    Functional,
    NonFunctional,
}

/// Requirement lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementStatus {
    #[default]
    Draft,
    Review,
    Approved,
    Rejected,
    Implemented,
}

/// Stakeholder-assessed priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Implementation risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Implementation complexity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Typed attribute metadata attached to a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementAttributes {
    pub priority: PriorityLevel,
    pub risk: RiskLevel,
    pub complexity: ComplexityLevel,
    /// Estimated effort (non-negative by construction)
    pub effort_estimation: u32,
}

/// A stored software requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// Document identifier (24-character hex)
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Interested parties, in submission order (never empty)
    pub stakeholders: Vec<String>,
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    pub attributes: RequirementAttributes,
    pub version: String,
    pub status: RequirementStatus,
    pub created_at: DateTime<Utc>,
}

impl Requirement {
    /// Description text for model prompts; absent descriptions render as "N/A"
    pub fn description_or_na(&self) -> &str {
        self.description.as_deref().unwrap_or("N/A")
    }
}

/// Payload for creating a requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    pub stakeholders: Vec<String>,
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    pub attributes: RequirementAttributes,
    pub version: String,
    #[serde(default)]
    pub status: RequirementStatus,
}

impl RequirementDto {
    /// Validate the payload before it reaches the repository
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("title must not be empty".to_string()));
        }
        if self.stakeholders.is_empty() {
            return Err(Error::InvalidInput(
                "at least one stakeholder is required".to_string(),
            ));
        }
        if self.stakeholders.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "stakeholder names must not be empty".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(Error::InvalidInput("version must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> RequirementDto {
        RequirementDto {
            title: "User login".to_string(),
            description: None,
            details: None,
            stakeholders: vec!["Product owner".to_string()],
            requirement_type: RequirementType::Functional,
            attributes: RequirementAttributes {
                priority: PriorityLevel::High,
                risk: RiskLevel::Medium,
                complexity: ComplexityLevel::Low,
                effort_estimation: 5,
            },
            version: "1.0".to_string(),
            status: RequirementStatus::default(),
        }
    }

    #[test]
    fn valid_dto_passes_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let mut dto = valid_dto();
        dto.title = "  ".to_string();
        assert!(matches!(dto.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn empty_stakeholders_rejected() {
        let mut dto = valid_dto();
        dto.stakeholders.clear();
        assert!(matches!(dto.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn blank_stakeholder_name_rejected() {
        let mut dto = valid_dto();
        dto.stakeholders.push(String::new());
        assert!(matches!(dto.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn status_defaults_to_draft() {
        let dto: RequirementDto = serde_json::from_value(serde_json::json!({
            "title": "Audit log",
            "stakeholders": ["Compliance"],
            "type": "NON_FUNCTIONAL",
            "attributes": {
                "priority": "LOW",
                "risk": "LOW",
                "complexity": "VERY_HIGH",
                "effort_estimation": 13
            },
            "version": "1.0"
        }))
        .unwrap();
        assert_eq!(dto.status, RequirementStatus::Draft);
    }

    #[test]
    fn enums_round_trip_screaming_case() {
        let json = serde_json::to_string(&RequirementType::NonFunctional).unwrap();
        assert_eq!(json, "\"NON_FUNCTIONAL\"");
        let json = serde_json::to_string(&ComplexityLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"VERY_HIGH\"");
    }
}
