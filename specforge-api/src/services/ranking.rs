//! Stakeholder-specific requirement ordering
//!
//! The model proposes an ordering over requirement ids; the merge step
//! turns that possibly-partial, possibly-hallucinated sequence into a
//! total order over exactly the input requirements. This is the one
//! AI-backed operation that degrades gracefully: any failure falls
//! back to the original order.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::Requirement;
use crate::services::extraction::extract_json;
use crate::services::gemini::TextGenerator;
use crate::services::prompts;

#[derive(Debug, Deserialize)]
struct RankingResponse {
    sorted_requirement_ids: Vec<String>,
}

/// Merge an externally-supplied id ordering with the full requirement list
///
/// Walks `ranked_ids` in order, emitting each requirement the first time
/// its id appears; ids not present in the input are dropped. Requirements
/// the ordering omitted follow in their original relative order. The
/// output is always a permutation of the input.
pub fn merge_ranked_ids(requirements: Vec<Requirement>, ranked_ids: &[String]) -> Vec<Requirement> {
    let index_by_id: HashMap<&str, usize> = requirements
        .iter()
        .enumerate()
        .map(|(i, req)| (req.id.as_str(), i))
        .collect();

    let mut consumed = vec![false; requirements.len()];
    let mut order = Vec::with_capacity(requirements.len());

    for id in ranked_ids {
        if let Some(&i) = index_by_id.get(id.as_str()) {
            if !consumed[i] {
                consumed[i] = true;
                order.push(i);
            }
        }
    }

    for (i, was_consumed) in consumed.iter().enumerate() {
        if !was_consumed {
            order.push(i);
        }
    }

    let mut slots: Vec<Option<Requirement>> = requirements.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Stakeholder ranking service
pub struct RankingService {
    ai: Arc<dyn TextGenerator>,
}

impl RankingService {
    pub fn new(ai: Arc<dyn TextGenerator>) -> Self {
        Self { ai }
    }

    /// Reorder requirements by importance to a stakeholder
    ///
    /// The stakeholder name is free text; it is a ranking criterion, not a
    /// lookup into the stored stakeholder sets. If the model call fails or
    /// its output cannot be parsed, the input order is returned unchanged.
    pub async fn reorder_by_stakeholder(
        &self,
        requirements: Vec<Requirement>,
        stakeholder: &str,
    ) -> Vec<Requirement> {
        let prompt = prompts::ranking_prompt(&requirements, stakeholder);

        let response = match self.ai.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(stakeholder, "Ranking model call failed, keeping original order: {}", e);
                return requirements;
            }
        };

        match extract_json::<RankingResponse>(&response) {
            Ok(ranking) => merge_ranked_ids(requirements, &ranking.sorted_requirement_ids),
            Err(e) => {
                tracing::warn!(stakeholder, "Ranking response unparseable, keeping original order: {}", e);
                requirements
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComplexityLevel, PriorityLevel, RequirementAttributes, RequirementStatus, RequirementType,
        RiskLevel,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use specforge_common::{Error, Result};

    fn requirement(id: &str) -> Requirement {
        Requirement {
            id: id.to_string(),
            title: format!("Requirement {}", id),
            description: None,
            details: None,
            stakeholders: vec!["Product owner".to_string()],
            requirement_type: RequirementType::Functional,
            attributes: RequirementAttributes {
                priority: PriorityLevel::Medium,
                risk: RiskLevel::Low,
                complexity: ComplexityLevel::Low,
                effort_estimation: 1,
            },
            version: "1.0".to_string(),
            status: RequirementStatus::Draft,
            created_at: Utc::now(),
        }
    }

    fn ids(requirements: &[Requirement]) -> Vec<&str> {
        requirements.iter().map(|r| r.id.as_str()).collect()
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identity_ranking_is_identity() {
        let input = vec![requirement("a"), requirement("b"), requirement("c")];
        let ranked = owned(&["a", "b", "c"]);
        let output = merge_ranked_ids(input, &ranked);
        assert_eq!(ids(&output), vec!["a", "b", "c"]);
    }

    #[test]
    fn foreign_ids_dropped_and_omitted_appended_in_original_order() {
        let input = vec![
            requirement("a"),
            requirement("b"),
            requirement("c"),
            requirement("d"),
        ];
        let ranked = owned(&["c", "x", "a"]);
        let output = merge_ranked_ids(input, &ranked);
        assert_eq!(ids(&output), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn duplicate_ids_consumed_once() {
        let input = vec![requirement("a"), requirement("b")];
        let ranked = owned(&["b", "b", "a", "b"]);
        let output = merge_ranked_ids(input, &ranked);
        assert_eq!(ids(&output), vec!["b", "a"]);
    }

    #[test]
    fn empty_ranking_keeps_original_order() {
        let input = vec![requirement("a"), requirement("b")];
        let output = merge_ranked_ids(input, &[]);
        assert_eq!(ids(&output), vec!["a", "b"]);
    }

    #[test]
    fn output_is_always_a_permutation() {
        let input = vec![requirement("a"), requirement("b"), requirement("c")];
        let ranked = owned(&["q", "c", "c", "z", "a"]);
        let output = merge_ranked_ids(input, &ranked);

        let mut seen = ids(&output);
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    /// Scripted generator returning a fixed response or a failure
    struct ScriptedGenerator {
        response: Result<String>,
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(Error::AiGeneration("scripted failure".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn reorder_applies_ai_ordering() {
        let ai = Arc::new(ScriptedGenerator {
            response: Ok(r#"```json
{"sorted_requirement_ids": ["b", "a"]}
```"#
                .to_string()),
        });
        let service = RankingService::new(ai);

        let input = vec![requirement("a"), requirement("b")];
        let output = service.reorder_by_stakeholder(input, "Security team").await;
        assert_eq!(ids(&output), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn reorder_falls_back_on_ai_failure() {
        let ai = Arc::new(ScriptedGenerator {
            response: Err(Error::AiGeneration("unreachable".to_string())),
        });
        let service = RankingService::new(ai);

        let input = vec![requirement("a"), requirement("b"), requirement("c")];
        let output = service.reorder_by_stakeholder(input, "Security team").await;
        assert_eq!(ids(&output), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn reorder_falls_back_on_unparseable_response() {
        let ai = Arc::new(ScriptedGenerator {
            response: Ok("I am unable to rank these requirements.".to_string()),
        });
        let service = RankingService::new(ai);

        let input = vec![requirement("a"), requirement("b")];
        let output = service.reorder_by_stakeholder(input, "Security team").await;
        assert_eq!(ids(&output), vec!["a", "b"]);
    }
}
