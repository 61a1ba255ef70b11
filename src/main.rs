use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod auth;
mod filter;
mod job_store;
mod server;
mod sqlite_persistence;
mod user_store;

use auth::JwtVerifier;
use job_store::SqliteJobStore;
use server::{run_server, RequestsLoggingLevel, ServerConfig};
use user_store::SqliteUserStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite database file for job postings.
    #[clap(value_parser = parse_path)]
    pub jobs_db: PathBuf,

    /// Path to the SQLite database file for user profiles.
    #[clap(value_parser = parse_path)]
    pub users_db: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Secret used to verify session tokens (HS256).
    #[clap(long, env = "JWT_SECRET")]
    pub jwt_secret: String,

    /// Number of read-only SQLite connections for job queries.
    #[clap(long, default_value_t = 4)]
    pub read_pool_size: usize,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!("Opening jobs database at {:?}...", cli_args.jobs_db);
    let job_store = Arc::new(SqliteJobStore::new(
        &cli_args.jobs_db,
        cli_args.read_pool_size,
    )?);

    info!("Opening users database at {:?}...", cli_args.users_db);
    let user_store = Arc::new(SqliteUserStore::new(&cli_args.users_db)?);

    let token_verifier = Arc::new(JwtVerifier::new(&cli_args.jwt_secret));

    let config = ServerConfig {
        port: cli_args.port,
        requests_logging_level: cli_args.logging_level,
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(config, job_store, user_store, token_verifier).await
}
