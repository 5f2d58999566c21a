use clap::{Parser, Subcommand};
use sqlshot_core::model::AppConfig;
use sqlshot_core::providers::llm::openai::OpenAiClient;
use sqlshot_core::providers::llm::script::ScriptClient;
use sqlshot_core::providers::llm::LlmClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "sqlshot",
    version,
    about = "Text-to-SQL prompting-strategy harness"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed the database and run every strategy over the question list
    Run(RunArgs),
    /// Seed the database and stop
    InitDb(DbArgs),
    /// List the model ids available to the configured credentials
    Models(ModelsArgs),
    Version,
}

#[derive(Parser, Clone)]
struct RunArgs {
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    #[arg(long, default_value = "database.sqlite")]
    db: PathBuf,
    #[arg(long, default_value = "sql/setup.sql")]
    schema: PathBuf,
    #[arg(long, default_value = "sql/setup_data.sql")]
    seed: PathBuf,

    /// directory for the per-strategy report files
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// write JSON reports instead of text
    #[arg(long)]
    json: bool,

    /// answer prompts from a recorded JSONL script instead of the API
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Parser, Clone)]
struct DbArgs {
    #[arg(long, default_value = "database.sqlite")]
    db: PathBuf,
    #[arg(long, default_value = "sql/setup.sql")]
    schema: PathBuf,
    #[arg(long, default_value = "sql/setup_data.sql")]
    seed: PathBuf,
}

#[derive(Parser, Clone)]
struct ModelsArgs {
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

mod exit_codes {
    pub const OK: i32 = 0;
    pub const QUESTION_FAILED: i32 = 1;
    pub const SETUP_ERROR: i32 = 2;
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::SETUP_ERROR
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => cmd_run(args).await,
        Command::InitDb(args) => cmd_init_db(args),
        Command::Models(args) => cmd_models(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

async fn cmd_run(args: RunArgs) -> anyhow::Result<i32> {
    let cfg = sqlshot_core::config::load_config(&args.config).map_err(|e| anyhow::anyhow!(e))?;
    let db = sqlshot_core::db::Database::init(&args.db, &args.schema, &args.seed)?;

    let schema_script = std::fs::read_to_string(&args.schema)?;
    let strategies = sqlshot_core::prompt::builtin_strategies(&schema_script);

    let runner = sqlshot_core::engine::runner::Runner {
        client: build_client(&cfg, args.script.as_deref())?,
        db,
    };
    let artifacts = runner
        .run(&strategies, &sqlshot_core::prompt::QUESTIONS)
        .await;

    std::fs::create_dir_all(&args.out)?;
    for strategy_artifacts in &artifacts {
        if args.json {
            sqlshot_core::report::json::write_report(&args.out, strategy_artifacts)?;
        } else {
            sqlshot_core::report::text::write_report(&args.out, strategy_artifacts)?;
        }
    }

    sqlshot_core::report::console::print_summary(&artifacts);

    let any_failed = artifacts.iter().any(|a| a.failed() > 0);
    Ok(if any_failed {
        exit_codes::QUESTION_FAILED
    } else {
        exit_codes::OK
    })
}

fn cmd_init_db(args: DbArgs) -> anyhow::Result<i32> {
    sqlshot_core::db::Database::init(&args.db, &args.schema, &args.seed)?;
    eprintln!("database seeded: {}", args.db.display());
    Ok(exit_codes::OK)
}

async fn cmd_models(args: ModelsArgs) -> anyhow::Result<i32> {
    let cfg = sqlshot_core::config::load_config(&args.config).map_err(|e| anyhow::anyhow!(e))?;
    let client = openai_client(&cfg);
    for id in client.list_models().await? {
        println!("{id}");
    }
    Ok(exit_codes::OK)
}

fn build_client(
    cfg: &AppConfig,
    script: Option<&std::path::Path>,
) -> anyhow::Result<Arc<dyn LlmClient>> {
    match script {
        Some(path) => Ok(Arc::new(ScriptClient::from_path(path)?)),
        None => Ok(Arc::new(openai_client(cfg))),
    }
}

fn openai_client(cfg: &AppConfig) -> OpenAiClient {
    OpenAiClient::new(
        cfg.model.clone(),
        cfg.openai_key.clone(),
        cfg.org_id.clone(),
        cfg.settings.temperature,
        cfg.settings.max_tokens,
        cfg.settings.timeout_seconds.map(Duration::from_secs),
    )
}
