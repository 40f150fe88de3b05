//! Submission intake from YAML/JSON documents.
//!
//! Documents are checked against an embedded JSON Schema for shape, then
//! converted into typed form fields. Key and answer semantics are enforced
//! by `RiskFactorSet`, not by the schema.

mod parser;
mod schema;

pub use parser::{IntakeError, IntakeForm};
pub use schema::validate_submission_schema;
