//! Data models for the SpecForge backend

pub mod glossary;
pub mod requirement;
pub mod wiegers;

pub use glossary::{Glossary, GlossaryTerm};
pub use requirement::{
    ComplexityLevel, PriorityLevel, Requirement, RequirementAttributes, RequirementDto,
    RequirementStatus, RequirementType, RiskLevel,
};
pub use wiegers::WiegersMatrixEntry;
