use clap::Parser;
use std::path::PathBuf;

use todoapp_cli::config::Config;

#[derive(Parser)]
#[command(name = "todoapp")]
#[command(about = "Todo service - CRUD over a SQLite todo table")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,
    #[arg(long, help = "SQLite database file (overrides DATABASE_PATH)")]
    database_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.port, cli.database_path)?;

    todoapp_cli::run_server(config).await
}
