use crate::db::Database;
use crate::model::{QuestionRecord, Strategy, StrategyArtifacts, NO_ERROR};
use crate::prompt;
use crate::providers::llm::LlmClient;
use crate::sanitize::sanitize_sql_response;
use std::sync::Arc;

/// Drives the question pipeline: one LLM call for SQL, one database query,
/// one LLM call for the friendly rephrasing. Strategies and questions run
/// strictly in order; the second LLM call depends on the database result,
/// which depends on the first call.
pub struct Runner {
    pub client: Arc<dyn LlmClient>,
    pub db: Database,
}

impl Runner {
    /// Runs every question under every strategy. A failure — bad API call,
    /// unparseable SQL, query error — is terminal for that question only:
    /// it is recorded in the strategy's report and the loop moves on.
    pub async fn run(&self, strategies: &[Strategy], questions: &[&str]) -> Vec<StrategyArtifacts> {
        let mut all = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            tracing::info!(event = "strategy_start", strategy = %strategy.name);
            let mut artifacts = StrategyArtifacts::new(strategy);

            for question in questions {
                tracing::info!(event = "question_start", question);
                match self.answer(strategy, question).await {
                    Ok(record) => artifacts.push_answer(record),
                    Err(e) => {
                        tracing::warn!(event = "question_failed", question, error = %e);
                        artifacts.push_error(question, &e.to_string());
                    }
                }
            }

            all.push(artifacts);
        }
        all
    }

    async fn answer(&self, strategy: &Strategy, question: &str) -> anyhow::Result<QuestionRecord> {
        let reply = self
            .client
            .complete(&prompt::question_prompt(strategy, question))
            .await?;
        let sql = sanitize_sql_response(&reply.text);
        tracing::debug!(event = "sql_generated", question, sql = %sql);

        let rows = self.db.run_sql(&sql)?;
        let raw = serde_json::to_string_pretty(&rows)?;

        let friendly = self
            .client
            .complete(&prompt::friendly_prompt(question, &raw))
            .await?;

        Ok(QuestionRecord {
            question: question.to_string(),
            sql,
            query_raw_response: raw,
            friendly_response: friendly.text.trim().to_string(),
            error: NO_ERROR.to_string(),
        })
    }
}
