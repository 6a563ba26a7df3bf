//! src/llm/deepseek.rs
use super::LLMClient;
use crate::config::Config;
use crate::errors::LlmError;
use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// --- 数据结构定义 (适配 OpenAI 兼容接口) ---
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

// --- 客户端实现 ---
pub struct DeepSeekClient {
    api_key: String,
    endpoint: String,
    model: String,
    client: Client,
}

impl DeepSeekClient {
    /// Builds a client from the resolved configuration. Proxy settings come
    /// from `ALL_PROXY`/`HTTPS_PROXY` when present.
    pub fn new(config: &Config) -> Result<Self> {
        let proxy_url = std::env::var("ALL_PROXY")
            .or_else(|_| std::env::var("HTTPS_PROXY"))
            .ok();
        let client = match proxy_url {
            Some(url) => {
                let proxy = reqwest::Proxy::all(&url)?;
                Client::builder().proxy(proxy).build()?
            }
            None => Client::builder().build()?,
        };

        Ok(Self {
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.api_url.trim_end_matches('/')),
            model: config.model.clone(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl LLMClient for DeepSeekClient {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let request_payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat { kind: "text" },
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(LlmError::Api { status, body });
        }

        let response = res.json::<ChatResponse>().await?;
        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(LlmError::EmptyChoices),
        }
    }
}
