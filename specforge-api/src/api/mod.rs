//! API route handlers

pub mod glossary;
pub mod health;
pub mod requirements;
pub mod wiegers;

pub use glossary::glossary_routes;
pub use health::health_routes;
pub use requirements::requirement_routes;
pub use wiegers::wiegers_routes;
