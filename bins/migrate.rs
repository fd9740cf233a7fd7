use migration::{Migrator, MigratorTrait};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl Command {
    fn parse(arg: Option<&str>) -> anyhow::Result<Self> {
        match arg.unwrap_or("up") {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "status" => Ok(Self::Status),
            other => Err(anyhow::anyhow!("unknown command {other:?}; expected up, down, fresh or status")),
        }
    }
}

fn load_config() -> anyhow::Result<configs::AppConfig> {
    // config.toml is optional; DATABASE_URL alone is enough
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => configs::AppConfig::from_env()
            .map_err(|env_err| anyhow::anyhow!("no usable config: {file_err}; {env_err}")),
    }
}

fn init_logging(cfg: &configs::LoggingConfig) {
    match cfg.format {
        configs::LogFormat::Compact => common::utils::logging::init_logging_default(&cfg.filter),
        configs::LogFormat::Json => common::utils::logging::init_logging_json(&cfg.filter),
    }
    info!(service = "migrate", event = "logger_init", "tracing subscriber initialized");
}

async fn run(command: Command, cfg: &configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    match command {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, None).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    // .env must be loaded before RUST_LOG, CONFIG_PATH and DATABASE_URL are read
    common::env::load_dotenv();

    let arg = std::env::args().nth(1);
    let command = match Command::parse(arg.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return std::process::ExitCode::from(2);
        }
    };

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default(common::DEFAULT_LOG_FILTER);
            error!(service = "migrate", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg.logging);

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "migrate", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "migrate", event = "start", ?command, sqlite = cfg.database.is_sqlite(), "running migrations");
    match rt.block_on(run(command, &cfg)) {
        Ok(()) => {
            info!(service = "migrate", event = "done", ?command, "migrations finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "migrate", event = "run_failed", error = %e, "migration failed");
            std::process::ExitCode::FAILURE
        }
    }
}
