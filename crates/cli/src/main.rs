use anyhow::Result;
use clap::{Parser, Subcommand};
use readoku_core::LedgerConfig;
use readoku_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "readoku")]
#[command(about = "Reading ledger and generation quota service for graded readers")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Keep everything in process memory instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },
    /// Apply database migrations and exit
    Migrate,
    /// Print a user's reading statistics as JSON
    Stats {
        #[arg(short, long)]
        user: i64,
    },
    /// Print a user's generation usage for today as JSON
    Quota {
        #[arg(short, long)]
        user: i64,
    },
    /// Register a user and print its id
    AddUser { email: String },
}

pub(crate) const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub(crate) const ENV_LLM_API_KEY: &str = "READOKU_LLM_API_KEY";
pub(crate) const ENV_LLM_URL: &str = "READOKU_LLM_URL";
pub(crate) const ENV_FRONTEND_URL: &str = "READOKU_FRONTEND_URL";

pub(crate) fn get_database_url() -> Result<String> {
    std::env::var(ENV_DATABASE_URL)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("{ENV_DATABASE_URL} environment variable must be set"))
}

pub(crate) fn get_api_key() -> Result<String> {
    std::env::var(ENV_LLM_API_KEY)
        .map_err(|_| anyhow::anyhow!("{ENV_LLM_API_KEY} environment variable must be set"))
}

pub(crate) fn get_base_url() -> String {
    std::env::var(ENV_LLM_URL).unwrap_or_else(|_| readoku_llm::DEFAULT_BASE_URL.to_owned())
}

pub(crate) fn get_frontend_url() -> String {
    std::env::var(ENV_FRONTEND_URL)
        .unwrap_or_else(|_| readoku_http::DEFAULT_FRONTEND_URL.to_owned())
}

pub(crate) async fn connect_postgres() -> Result<StorageBackend> {
    let url = get_database_url()?;
    Ok(StorageBackend::new_postgres(&url).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = LedgerConfig::from_env()?;

    match cli.command {
        Commands::Serve { port, host, memory } => {
            commands::serve::run(port, host, memory, config).await
        },
        Commands::Migrate => commands::migrate::run().await,
        Commands::Stats { user } => commands::report::run_stats(user, config).await,
        Commands::Quota { user } => commands::report::run_quota(user, config).await,
        Commands::AddUser { email } => commands::report::run_add_user(&email).await,
    }
}
