use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODELS_URL: &str = "https://api.openai.com/v1/models";

pub struct OpenAiClient {
    pub model: String,
    pub api_key: String,
    pub org_id: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(
        model: String,
        api_key: String,
        org_id: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            model,
            api_key,
            org_id,
            temperature,
            max_tokens,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    async fn send_chat(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let resp = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Organization", &self.org_id)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI chat API error: {}", error_text);
        }

        let json: serde_json::Value = resp.json().await?;

        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("OpenAI API response missing content"))?
            .trim()
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model: self.model.clone(),
        })
    }

    /// Lists the model ids available to the configured credentials.
    pub async fn list_models(&self) -> anyhow::Result<Vec<String>> {
        let resp = self
            .client
            .get(MODELS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Organization", &self.org_id)
            .send()
            .await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI models API error: {}", error_text);
        }

        let json: serde_json::Value = resp.json().await?;
        let ids = json
            .pointer("/data")
            .and_then(|v| v.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m.get("id").and_then(|v| v.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        match self.timeout {
            Some(t) => tokio::time::timeout(t, self.send_chat(prompt))
                .await
                .map_err(|_| anyhow::anyhow!("chat request timed out after {}s", t.as_secs()))?,
            None => self.send_chat(prompt).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
