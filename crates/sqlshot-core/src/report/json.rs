use crate::model::StrategyArtifacts;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// JSON variant of the per-strategy report:
/// `{strategy, prompt_prefix, questionResults: [...]}`.
pub fn write_report(dir: &Path, artifacts: &StrategyArtifacts) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!(
        "response_{}_{}.json",
        artifacts.strategy,
        Utc::now().timestamp_millis()
    ));
    std::fs::write(&path, serde_json::to_string_pretty(artifacts)?)?;
    tracing::info!(event = "report_written", path = %path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionRecord, Strategy, StrategyArtifacts, NO_ERROR};

    #[test]
    fn json_report_carries_question_results() -> anyhow::Result<()> {
        let strategy = Strategy {
            name: "double_shot".into(),
            prompt_prefix: "schema plus examples".into(),
        };
        let mut artifacts = StrategyArtifacts::new(&strategy);
        artifacts.push_answer(QuestionRecord {
            question: "Which are the most expensive services offered?".into(),
            sql: "SELECT name FROM service ORDER BY price DESC;".into(),
            query_raw_response: "[]".into(),
            friendly_response: "Nothing on file yet.".into(),
            error: NO_ERROR.into(),
        });

        let dir = tempfile::tempdir()?;
        let path = write_report(dir.path(), &artifacts)?;
        assert!(path.file_name().unwrap().to_string_lossy().ends_with(".json"));

        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(parsed["strategy"], "double_shot");
        assert_eq!(parsed["prompt_prefix"], "schema plus examples");
        assert_eq!(parsed["questionResults"][0]["error"], "None");
        assert_eq!(
            parsed["questionResults"][0]["friendlyResponse"],
            "Nothing on file yet."
        );
        Ok(())
    }
}
