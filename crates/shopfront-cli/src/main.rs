//! Shopfront - a command-line shop front for the product-trial backend.
//!
//! Logs in against the backend, keeps the session token between runs, and
//! lists or shows products with the token attached.

mod commands;
mod utils;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shopfront_core::config::APP_NAME;
use shopfront_core::models::DEFAULT_PAGE_SIZE;
use shopfront_core::{storage, ApiClient, Config, SessionManager, StorageBackend};

#[derive(Debug, Parser)]
#[command(name = "shopfront", version, about = "Browse the product catalogue from the terminal")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, env = "SHOPFRONT_API_URL")]
    api_url: Option<String>,

    /// Where the session token is kept: file, keyring or memory
    #[arg(long, global = true, env = "SHOPFRONT_STORAGE")]
    storage: Option<StorageBackend>,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, global = true, env = "SHOPFRONT_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and remember the session token
    Login {
        /// Account email (defaults to the last one used)
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// Show whether a session token is held
    Status,
    /// Create a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        firstname: String,
    },
    /// List one page of products
    Products {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Show product details
    Product {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", APP_NAME));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_dir.as_ref());

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(ref url) = cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(backend) = cli.storage {
        config.storage = backend;
    }
    debug!(?config, "Loaded configuration");

    let storage_dir = config.cache_dir().context("Failed to locate storage directory")?;
    let store = storage::open(config.storage, &storage_dir);

    let session = Arc::new(SessionManager::new(store));
    session.restore_from_durable_storage();

    let api = ApiClient::new(&config.api_config(), session)
        .context("Failed to create API client")?;
    info!(base_url = api.base_url(), "Shopfront starting");

    match cli.command {
        Command::Login { email } => commands::login(&api, &mut config, email).await,
        Command::Logout => {
            commands::logout(&api);
            Ok(())
        }
        Command::Status => {
            commands::status(&api, &config);
            Ok(())
        }
        Command::Register {
            username,
            email,
            firstname,
        } => commands::register(&api, username, email, firstname).await,
        Command::Products { page, size } => commands::products(&api, page, size).await,
        Command::Product { ids } => commands::product(&api, &ids).await,
    }
}
