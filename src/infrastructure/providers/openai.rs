//! OpenAI 호환 chat completions provider 어댑터.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::application::ports::CompletionProvider;
use crate::domain::review::{CompletionRequest, CompletionResponse, TokenUsage};
use crate::infrastructure::config::{Config, resolve_provider_api_key};

use super::api_runner::{build_api_client, collect_text, send_json};

pub struct OpenAiProvider {
    client: Client,
    endpoint: Url,
    credential: String,
}

impl OpenAiProvider {
    /// 인증 키가 없으면 실행을 중단할 수 있도록 에러를 반환한다.
    pub fn from_config(config: &Config) -> Result<Self> {
        let Some(credential) = resolve_provider_api_key(&config.provider).credential else {
            bail!(
                "Missing {}. Set it in your environment or a .env file.",
                config.provider.api_key_env()
            );
        };

        Ok(Self {
            client: build_api_client(),
            endpoint: chat_completions_url(config.provider.api_base())?,
            credential,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        debug!(endpoint = %self.endpoint, model = %request.model, "sending chat completion");
        let http = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.credential)
            .json(&build_payload(request));

        let response = send_json(self.name(), "request chat completion", http).await?;
        parse_completion(&response)
    }
}

/// `{api_base}/chat/completions` 엔드포인트를 만든다.
fn chat_completions_url(api_base: &str) -> Result<Url> {
    let base = format!("{}/", api_base.trim().trim_end_matches('/'));
    Url::parse(&base)
        .with_context(|| format!("invalid provider api_base: {api_base}"))?
        .join("chat/completions")
        .with_context(|| format!("invalid provider api_base: {api_base}"))
}

fn build_payload(request: &CompletionRequest) -> Value {
    json!({
        "model": request.model,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.user }
        ],
        "temperature": request.temperature
    })
}

/// 첫 번째 choice의 message content를 그대로 사용한다(빈 문자열 포함).
/// content 자체가 없거나 null이면 에러.
fn parse_completion(response: &Value) -> Result<CompletionResponse> {
    let content = match response.pointer("/choices/0/message/content") {
        None | Some(Value::Null) => bail!("OpenAI: missing response content"),
        Some(value) => collect_text(value),
    };

    Ok(CompletionResponse {
        content,
        usage: TokenUsage {
            prompt_tokens: response
                .pointer("/usage/prompt_tokens")
                .and_then(Value::as_u64),
            completion_tokens: response
                .pointer("/usage/completion_tokens")
                .and_then(Value::as_u64),
            total_tokens: response
                .pointer("/usage/total_tokens")
                .and_then(Value::as_u64),
        },
    })
}
