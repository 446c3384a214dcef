//! Chat-completion client: one POST, one answer.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TALLY_AI_API_KEY";

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    /// Overrides the environment variable when set.
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            temperature: 0.4,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

fn resolve_api_key(config: &AiConfig) -> Result<String> {
    if let Some(key) = config.api_key.as_deref() {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => bail!("missing API key: set {API_KEY_ENV} or [ai].api_key in config.toml"),
    }
}

/// Send one chat-completion request and return the assistant's text.
///
/// The API key is resolved before any network I/O, so a missing key fails
/// immediately. Non-2xx responses propagate as errors carrying the status
/// and body. No retry on any outcome.
pub async fn chat_complete(config: &AiConfig, system: &str, turns: &[ChatTurn]) -> Result<String> {
    let key = resolve_api_key(config)?;

    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        messages: Vec<Msg>,
        temperature: f32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let mut msgs = vec![Msg {
        role: "system".to_string(),
        content: system.to_string(),
    }];
    for t in turns {
        msgs.push(Msg {
            role: t.role.clone(),
            content: t.content.clone(),
        });
    }

    let body = Req {
        model: config.model.clone(),
        messages: msgs,
        temperature: config.temperature,
    };

    let url = format!(
        "{}/v1/chat/completions",
        config.base_url.trim_end_matches('/')
    );
    tracing::debug!(model = %config.model, turns = turns.len(), "chat completion request");

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .bearer_auth(&key)
        .json(&body)
        .send()
        .await
        .context("chat completion request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("chat completion error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse chat completion response")?;
    let content = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(content.trim().to_string())
}
