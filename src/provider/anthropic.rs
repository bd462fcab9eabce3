use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Completion, Provider};
use crate::config::Config;
use crate::errors::StageError;

pub struct Anthropic {
    model: String,
    api_key: String,
    api_base: String,
    api_version: String,
    timeout: Duration,
    client: Client,
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Msg<'a>>,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: String,
    #[serde(default)]
    r#type: String,
}

impl Anthropic {
    pub fn new(cfg: &Config, api_key: String) -> Self {
        Self {
            model: cfg.model.clone(),
            api_key,
            api_base: cfg.api_base.clone(),
            api_version: cfg.api_version.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Provider for Anthropic {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, StageError> {
        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let body = MsgRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| StageError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| StageError::Transport(format!("read body failed: {e}")))?;

        if !status.is_success() {
            return Err(StageError::Transport(format!(
                "endpoint returned {status}: {text}"
            )));
        }

        let parsed: MsgResponse = serde_json::from_str(&text)
            .map_err(|e| StageError::Transport(format!("response envelope parse error: {e}")))?;

        // All text segments, in order, joined by newlines.
        let joined = parsed
            .content
            .iter()
            .filter(|b| b.r#type == "text" && !b.text.is_empty())
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if joined.is_empty() {
            Ok(Completion::Empty)
        } else {
            Ok(Completion::Text(joined))
        }
    }
}
