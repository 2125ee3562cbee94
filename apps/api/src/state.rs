use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ProposalGenerator;
use crate::proposal::template::PromptTemplate;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Parsed and schema-checked prompt template.
    pub template: Arc<PromptTemplate>,
    /// Generation backend. `LlmClient` in production, a fake in tests.
    pub generator: Arc<dyn ProposalGenerator>,
}
