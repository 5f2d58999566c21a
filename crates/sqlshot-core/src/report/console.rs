use crate::model::{StrategyArtifacts, NO_ERROR};

pub fn print_summary(all: &[StrategyArtifacts]) {
    let mut answered = 0;
    let mut failed = 0;

    for artifacts in all {
        for record in artifacts.records.iter().filter(|r| r.error != NO_ERROR) {
            eprintln!(
                "FAIL [{}]: {} ({})",
                artifacts.strategy, record.question, record.error
            );
        }
        answered += artifacts.answered();
        failed += artifacts.failed();
        eprintln!(
            "{}: answered={} failed={}",
            artifacts.strategy,
            artifacts.answered(),
            artifacts.failed()
        );
    }

    eprintln!("Results: answered={} failed={}", answered, failed);
}
