use async_trait::async_trait;

use crate::config::Config;
use crate::errors::StageError;

pub mod anthropic;

/// Outcome of a completion call. An envelope with no text segments is a
/// distinct signal from a transport failure; both end in fallback, but they
/// are logged differently.
#[derive(Debug)]
pub enum Completion {
    Text(String),
    Empty,
}

/// The sole boundary to the external text-generation endpoint. One outbound
/// request per call; no retries, no backoff. The fallback strategy absorbs
/// every failure.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, StageError>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

/// Credential check happens here, exactly once. No key means no provider, and
/// the pipeline runs fully on fallback output; that is a supported mode, not
/// an error.
pub fn make_provider(cfg: &Config) -> Option<DynProvider> {
    let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
    if api_key.trim().is_empty() {
        return None;
    }
    Some(Box::new(anthropic::Anthropic::new(cfg, api_key)))
}
