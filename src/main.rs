//! Tally Server — cookie-based JWT session service.
//!
//! Main entry point that wires all crates together. Runs the HTTP server by
//! default; the account subcommands provision credentials in the configured
//! database.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use tally_api::AppState;
use tally_auth::{
    AccountProvisioner, MemoryTokenDenylist, PasswordHasher, SessionAuthenticator, TokenCodec,
};
use tally_core::config::AppConfig;
use tally_core::error::AppError;
use tally_core::traits::{AccountStore, CredentialStore};
use tally_database::{DatabasePool, MemoryCredentialStore};

/// Tally session authentication server
#[derive(Debug, Parser)]
#[command(name = "tally-server", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create an account in the configured database
    CreateUser {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Plaintext password
        #[arg(short, long)]
        password: String,
    },
    /// Replace the password of an existing account
    ResetPassword {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// New plaintext password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run(config).await,
        Command::CreateUser { email, password } => create_user(config, &email, &password).await,
        Command::ResetPassword { email, password } => {
            reset_password(config, &email, &password).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TALLY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Credential store handles: one for login lookups, one for provisioning.
struct Stores {
    credentials: Arc<dyn CredentialStore>,
    accounts: Arc<dyn AccountStore>,
    database: Option<DatabasePool>,
}

/// Open PostgreSQL when `database.url` is set, otherwise an in-memory store
async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    if config.database.url.is_none() {
        tracing::warn!("database.url is not set, credentials are kept in memory");
        let memory = Arc::new(MemoryCredentialStore::new());
        return Ok(Stores {
            credentials: memory.clone(),
            accounts: memory,
            database: None,
        });
    }

    let pool = DatabasePool::connect(&config.database).await?;
    pool.migrate().await?;

    let users = Arc::new(pool.users());
    Ok(Stores {
        credentials: users.clone(),
        accounts: users,
        database: Some(pool),
    })
}

/// Open the database for an account subcommand, which needs persistent storage
async fn open_accounts(config: &AppConfig) -> Result<(AccountProvisioner, DatabasePool), AppError> {
    if config.database.url.is_none() {
        return Err(AppError::configuration(
            "account commands need database.url; in-memory accounts vanish on exit",
        ));
    }
    let stores = open_stores(config).await?;
    let provisioner =
        AccountProvisioner::new(stores.accounts, Arc::new(PasswordHasher::new()), &config.auth);
    let pool = stores
        .database
        .ok_or_else(|| AppError::internal("database pool missing after connect"))?;
    Ok((provisioner, pool))
}

async fn create_user(config: AppConfig, email: &str, password: &str) -> Result<(), AppError> {
    let (provisioner, pool) = open_accounts(&config).await?;
    let result = provisioner.create(email, password).await;
    pool.close().await;

    let credential = result?;
    println!("Account '{}' created", credential.email);
    Ok(())
}

async fn reset_password(config: AppConfig, email: &str, password: &str) -> Result<(), AppError> {
    let (provisioner, pool) = open_accounts(&config).await?;
    let result = provisioner.reset_password(email, password).await;
    pool.close().await;

    result?;
    println!("Password for '{}' updated", email.trim());
    Ok(())
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Tally v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Signing keys ─────────────────────────────────────
    let codec = Arc::new(TokenCodec::new(&config.auth)?);

    // ── Step 2: Credential store ─────────────────────────────────
    let stores = open_stores(&config).await?;
    let hasher = Arc::new(PasswordHasher::new());

    if let Some(account) = &config.auth.bootstrap {
        let provisioner =
            AccountProvisioner::new(stores.accounts.clone(), hasher.clone(), &config.auth);
        if provisioner.ensure(&account.email, &account.password).await? {
            tracing::info!(email = %account.email, "Bootstrap account created");
        }
    }

    // ── Step 3: Auth system ──────────────────────────────────────
    let mut authenticator =
        SessionAuthenticator::new(stores.credentials, hasher, codec, &config.auth)?;
    if config.auth.revocation_enabled {
        tracing::info!("Session revocation enabled");
        authenticator = authenticator.with_denylist(Arc::new(MemoryTokenDenylist::new()));
    }

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let app_state = AppState {
        authenticator: Arc::new(authenticator),
        database: stores.database.clone(),
    };
    let app = tally_api::build_app(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Tally server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(pool) = stores.database {
        pool.close().await;
    }

    tracing::info!("Tally server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
