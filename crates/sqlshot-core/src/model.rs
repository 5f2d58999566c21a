use serde::{Deserialize, Serialize};

/// Separator block appended after every question in the text report.
pub const SEPARATOR: &str = "\n-----------------------------\n";

/// Marker stored in a [`QuestionRecord`] whose question completed cleanly.
pub const NO_ERROR: &str = "None";

/// Credentials and model choice, loaded once from `config.json` and
/// immutable for the rest of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "openaiKey")]
    pub openai_key: String,
    #[serde(rename = "orgId")]
    pub org_id: String,
    pub model: String,
    #[serde(default)]
    pub settings: Settings,
}

/// Optional knobs. Defaults match the values the harness has always used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Whole-call deadline for one chat request. Off by default: a hung
    /// call blocks the pipeline.
    pub timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.7,
            timeout_seconds: None,
        }
    }
}

/// A named prompt-construction template. The prefix carries the schema
/// script, zero or more worked example queries, and the instruction
/// sentence; the question is appended at ask time.
#[derive(Debug, Clone)]
pub struct Strategy {
    pub name: String,
    pub prompt_prefix: String,
}

/// One result row: column name to value, in statement column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// Per-question outcome, in the field layout the JSON report uses.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRecord {
    pub question: String,
    pub sql: String,
    #[serde(rename = "queryRawResponse")]
    pub query_raw_response: String,
    #[serde(rename = "friendlyResponse")]
    pub friendly_response: String,
    pub error: String,
}

/// Everything one strategy accumulates over its question loop: the ordered
/// records plus the text blocks that become the `.txt` report.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyArtifacts {
    pub strategy: String,
    pub prompt_prefix: String,
    #[serde(rename = "questionResults")]
    pub records: Vec<QuestionRecord>,
    #[serde(skip)]
    pub blocks: Vec<String>,
}

impl StrategyArtifacts {
    pub fn new(strategy: &Strategy) -> Self {
        Self {
            strategy: strategy.name.clone(),
            prompt_prefix: strategy.prompt_prefix.clone(),
            records: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn push_answer(&mut self, record: QuestionRecord) {
        self.blocks.push(format!("Question: {}", record.question));
        self.blocks.push(format!("Generated SQL:\n{}", record.sql));
        self.blocks
            .push(format!("Query Raw Result:\n{}", record.query_raw_response));
        self.blocks
            .push(format!("Friendly Response:\n{}", record.friendly_response));
        self.blocks.push(SEPARATOR.to_string());
        self.records.push(record);
    }

    pub fn push_error(&mut self, question: &str, message: &str) {
        self.blocks
            .push(format!("Error processing question '{question}': {message}"));
        self.blocks.push(SEPARATOR.to_string());
        self.records.push(QuestionRecord {
            question: question.to_string(),
            sql: String::new(),
            query_raw_response: String::new(),
            friendly_response: String::new(),
            error: message.to_string(),
        });
    }

    pub fn answered(&self) -> usize {
        self.records.iter().filter(|r| r.error == NO_ERROR).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.answered()
    }
}
