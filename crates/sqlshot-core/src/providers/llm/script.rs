use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Offline provider: answers prompts from a pre-recorded script instead of
/// the network. A prompt with no scripted reply is an error, so a run
/// against a script either matches it or fails loudly per question.
#[derive(Clone)]
pub struct ScriptClient {
    replies: Arc<HashMap<String, String>>,
    model: String,
}

impl ScriptClient {
    /// Loads a JSONL file of `{"prompt": ..., "response": ...}` lines.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| anyhow::anyhow!("failed to open script file {}: {}", path.display(), e))?;
        let reader = std::io::BufReader::new(file);

        #[derive(serde::Deserialize)]
        struct ScriptEntry {
            prompt: String,
            response: String,
            model: Option<String>,
        }

        let mut replies = HashMap::new();
        let mut model = "script".to_string();
        use std::io::BufRead;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: ScriptEntry = serde_json::from_str(&line)
                .map_err(|e| anyhow::anyhow!("line {}: failed to parse script entry: {}", i + 1, e))?;

            if let Some(m) = entry.model {
                model = m;
            }

            if replies.contains_key(&entry.prompt) {
                anyhow::bail!("line {}: duplicate prompt in script file", i + 1);
            }
            replies.insert(entry.prompt, entry.response);
        }

        Ok(Self {
            replies: Arc::new(replies),
            model,
        })
    }

    pub fn from_pairs<I>(model: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            replies: Arc::new(pairs.into_iter().collect()),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let Some(text) = self.replies.get(prompt) else {
            anyhow::bail!("script miss: no reply recorded for prompt");
        };
        Ok(LlmResponse {
            text: text.clone(),
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "script"
    }
}
