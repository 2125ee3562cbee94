// Proposal pipeline: field validation, prompt assembly, generation call,
// and `.docx` assembly. All model calls go through llm_client.

pub mod blocks;
pub mod document;
pub mod fields;
pub mod generator;
pub mod handlers;
pub mod template;
