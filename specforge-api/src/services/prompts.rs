//! Prompt construction for model operations
//!
//! Prompts impose all of the structure the provider does not: each one
//! names the exact JSON shape the response must carry. Parsing lives in
//! [`super::extraction`].

use crate::models::{Requirement, RequirementType};

/// Fold a requirement list into a numbered context block
///
/// Absent descriptions render as "N/A".
fn summarize_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .enumerate()
        .map(|(i, req)| {
            format!(
                "{}. id: {}\n   title: {}\n   description: {}\n   type: {}\n   stakeholders: {}",
                i + 1,
                req.id,
                req.title,
                req.description_or_na(),
                type_label(req.requirement_type),
                req.stakeholders.join(", "),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn type_label(requirement_type: RequirementType) -> &'static str {
    match requirement_type {
        RequirementType::Functional => "FUNCTIONAL",
        RequirementType::NonFunctional => "NON_FUNCTIONAL",
    }
}

/// Prompt for Wiegers matrix rating generation
pub fn rating_prompt(requirements: &[Requirement]) -> String {
    format!(
        r#"You are assisting with software requirements prioritization using the Wiegers matrix.

For every requirement listed below, rate the following criteria as integers from 1 to 5:
- value: benefit to the user
- cost: implementation cost
- risk: technical risk
- urgency: how soon it is needed

## Requirements
{}

Respond with ONLY a JSON array, one object per requirement, each with the keys
"requirement_id", "requirement_title", "value", "cost", "risk", "urgency".
Use the ids and titles exactly as given. No commentary."#,
        summarize_requirements(requirements)
    )
}

/// Prompt for stakeholder-specific priority ordering
pub fn ranking_prompt(requirements: &[Requirement], stakeholder: &str) -> String {
    format!(
        r#"You are assisting with software requirements prioritization.

Order the requirements listed below by importance to the stakeholder "{}",
from most to least important. Judge importance from each requirement's
content and its stakeholder list.

## Requirements
{}

Respond with ONLY a JSON object of the form
{{"sorted_requirement_ids": ["<id>", ...]}}
using the ids exactly as given. No commentary."#,
        stakeholder,
        summarize_requirements(requirements)
    )
}

/// Prompt for glossary generation over the whole requirement set
pub fn glossary_prompt(requirements: &[Requirement]) -> String {
    format!(
        r#"You are assisting with software requirements documentation.

Extract the technical terms a reader of the requirements below would need
defined, and write a short glossary definition for each.

## Requirements
{}

Respond with ONLY a JSON array of objects, each with the keys "name" and
"definition". No commentary."#,
        summarize_requirements(requirements)
    )
}

/// Prompt for generating a requirement description from its metadata
pub fn description_prompt(
    title: &str,
    requirement_type: RequirementType,
    stakeholders: &[String],
) -> String {
    format!(
        r#"Based on the following requirement information, write a clear, detailed description:

Title: {}
Type: {}
Stakeholders: {}

Cover the purpose and objectives, the main functionality, the expected
outcomes, and any relevant technical considerations. Keep the tone
professional and suitable for a software requirements document. Respond
with the description text only."#,
        title,
        type_label(requirement_type),
        stakeholders.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComplexityLevel, PriorityLevel, RequirementAttributes, RequirementStatus, RiskLevel,
    };
    use chrono::Utc;

    fn requirement(id: &str, title: &str, description: Option<&str>) -> Requirement {
        Requirement {
            id: id.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            details: None,
            stakeholders: vec!["Product owner".to_string()],
            requirement_type: RequirementType::Functional,
            attributes: RequirementAttributes {
                priority: PriorityLevel::Medium,
                risk: RiskLevel::Low,
                complexity: ComplexityLevel::Low,
                effort_estimation: 3,
            },
            version: "1.0".to_string(),
            status: RequirementStatus::Draft,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_includes_ids_and_titles() {
        let reqs = vec![
            requirement("aaaaaaaaaaaaaaaaaaaaaaaa", "User login", Some("Sign-in flow")),
            requirement("bbbbbbbbbbbbbbbbbbbbbbbb", "Audit log", None),
        ];
        let prompt = rating_prompt(&reqs);
        assert!(prompt.contains("aaaaaaaaaaaaaaaaaaaaaaaa"));
        assert!(prompt.contains("User login"));
        assert!(prompt.contains("Sign-in flow"));
    }

    #[test]
    fn missing_description_renders_as_na() {
        let reqs = vec![requirement("aaaaaaaaaaaaaaaaaaaaaaaa", "Audit log", None)];
        let prompt = glossary_prompt(&reqs);
        assert!(prompt.contains("description: N/A"));
    }

    #[test]
    fn ranking_prompt_names_the_stakeholder() {
        let reqs = vec![requirement("aaaaaaaaaaaaaaaaaaaaaaaa", "User login", None)];
        let prompt = ranking_prompt(&reqs, "Security team");
        assert!(prompt.contains("Security team"));
        assert!(prompt.contains("sorted_requirement_ids"));
    }
}
