//! Proposal generation — orchestrates one submission end to end.
//!
//! Flow: validate required fields → assemble prompt → generation call →
//!       build document → serialize `.docx`.
//!
//! Nothing is retried and nothing is stored. A failed generation call means
//! no document is built.

use bytes::Bytes;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::ProposalGenerator;
use crate::proposal::document::{build_document, proposal_filename, OutputDocument};
use crate::proposal::fields::FieldSet;
use crate::proposal::template::PromptTemplate;

/// The result of a successful submission.
#[derive(Debug, Clone)]
pub struct GeneratedProposal {
    pub submission_id: Uuid,
    pub filename: String,
    pub proposal_text: String,
    pub document: OutputDocument,
}

/// Checks required fields and fills the template.
/// Returns a validation error naming every blank required field.
pub fn assemble_prompt(template: &PromptTemplate, fields: &FieldSet) -> Result<String, AppError> {
    let missing = fields.missing_required();
    if !missing.is_empty() {
        return Err(AppError::missing_fields(&missing));
    }
    Ok(template.render(&fields.template_values()))
}

/// Runs validation, the generation call, and document assembly.
pub async fn generate_proposal(
    template: &PromptTemplate,
    generator: &dyn ProposalGenerator,
    fields: &FieldSet,
    generated_on: NaiveDate,
) -> Result<GeneratedProposal, AppError> {
    let submission_id = Uuid::new_v4();

    let prompt = match assemble_prompt(template, fields) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("Submission {submission_id} rejected: {e}");
            return Err(e);
        }
    };

    info!(
        "Submission {}: requesting proposal for '{}' ({} prompt chars)",
        submission_id,
        fields.project_name,
        prompt.len()
    );

    let proposal_text = generator.generate(&prompt).await?;

    let document = build_document(&fields.project_name, &proposal_text, generated_on);
    info!(
        "Submission {}: built document with {} blocks",
        submission_id,
        document.blocks.len()
    );

    Ok(GeneratedProposal {
        submission_id,
        filename: proposal_filename(&fields.funder_name, &fields.project_name),
        proposal_text,
        document,
    })
}

impl GeneratedProposal {
    /// Serializes the document for download.
    pub fn docx_bytes(&self) -> Result<Bytes, AppError> {
        self.document
            .to_docx()
            .map(Bytes::from)
            .map_err(|e| AppError::Document(e.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
