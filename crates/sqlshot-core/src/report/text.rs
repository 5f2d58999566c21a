use crate::model::StrategyArtifacts;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Writes one strategy's accumulated blocks to
/// `response_<strategy>_<unix_ms>.txt` in `dir`. The timestamp in the name
/// keeps every run's report; files are never overwritten or read back.
pub fn write_report(dir: &Path, artifacts: &StrategyArtifacts) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!(
        "response_{}_{}.txt",
        artifacts.strategy,
        Utc::now().timestamp_millis()
    ));
    std::fs::write(&path, artifacts.blocks.join("\n"))?;
    tracing::info!(event = "report_written", path = %path.display());
    Ok(path)
}
