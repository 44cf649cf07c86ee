//! AI description generation for new requirements
//!
//! Used at creation time only: the generated text replaces the submitted
//! description before the requirement is stored. The model's raw text is
//! the result; no JSON contract applies here.

use specforge_common::Result;

use crate::models::RequirementDto;
use crate::services::gemini::TextGenerator;
use crate::services::prompts;

/// Generate a description for a requirement being created
pub async fn generate_description(
    ai: &dyn TextGenerator,
    dto: &RequirementDto,
) -> Result<String> {
    let prompt = prompts::description_prompt(&dto.title, dto.requirement_type, &dto.stakeholders);
    let text = ai.generate(&prompt).await?;
    Ok(text.trim().to_string())
}
