use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Values people leave in `.env` files instead of a real key.
const PLACEHOLDER_KEYS: &[&str] = &[
    "your-api-key-here",
    "your_api_key_here",
    "your-groq-api-key",
    "changeme",
    "xxx",
];

/// Application configuration loaded from environment variables.
/// A missing API key does not stop startup; generation requests are refused instead.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_timeout_secs: u64,
    pub prompt_template_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "groq_api_key",
                &self.groq_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("prompt_template_path", &self.prompt_template_path)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .and_then(|key| usable_api_key(&key)),
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            llm_timeout_secs: parse_timeout_secs(
                &std::env::var("LLM_TIMEOUT_SECS").unwrap_or_else(|_| "60".to_string()),
            )?,
            prompt_template_path: std::env::var("PROMPT_TEMPLATE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Parses the generation-call timeout. Zero would fail every call immediately.
fn parse_timeout_secs(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
    ensure!(secs > 0, "LLM_TIMEOUT_SECS must be greater than zero");
    Ok(secs)
}

/// Returns the trimmed key, or `None` for empty and placeholder values.
pub fn usable_api_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty()
        || (key.starts_with('<') && key.ends_with('>'))
        || PLACEHOLDER_KEYS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(key))
    {
        return None;
    }
    Some(key.to_string())
}
