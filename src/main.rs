use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use airsense::application::services::{CancellationScope, SessionContext};
use airsense::domain::errors::ApiError;
use airsense::domain::ports::TokenStoragePort;
use airsense::infrastructure::{
    ApiClient, AppConfig, CliArgs, FileTokenStorage, HttpAirQualityClient, KeyringTokenStorage,
    MemoryTokenStorage, StorageManager, TerminalAlerts, TokenBackend,
};
use airsense::presentation::screens::Painter;
use airsense::presentation::{App, AppContext};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, StorageManager)> {
    let storage = StorageManager::new()?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("failed to load configuration")?;
    config.merge_with_args(args);
    Ok((config, storage))
}

fn token_storage(backend: TokenBackend) -> Result<Arc<dyn TokenStoragePort>> {
    Ok(match backend {
        TokenBackend::Keyring => Arc::new(KeyringTokenStorage::new()),
        TokenBackend::File => Arc::new(FileTokenStorage::new()?),
        TokenBackend::Memory => Arc::new(MemoryTokenStorage::new()),
    })
}

fn spawn_interrupt_handler(interrupt: CancellationScope) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received");
                interrupt.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let (config, state_storage) = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = airsense::VERSION,
        api = config.api_base_url(),
        backend = ?config.token_backend,
        "Starting {}",
        airsense::NAME
    );

    let session = Arc::new(SessionContext::new(token_storage(config.token_backend)?));
    let client = Arc::new(ApiClient::new(
        config.api_base_url(),
        config.request_timeout(),
        session.clone(),
    )?);

    let mut app = App::start(AppContext {
        session,
        api: Arc::new(HttpAirQualityClient::new(client)),
        alerts: Arc::new(TerminalAlerts::new(config.ui.color)),
        state_storage,
        painter: Painter::new(config.ui.color, config.ui.timestamp_format.clone()),
        push_token: config.push_token.clone(),
    })
    .await;

    let interrupt = CancellationScope::new();
    spawn_interrupt_handler(interrupt.clone());

    let lines = match app.run(args.command, &interrupt).await {
        Ok(lines) => lines,
        Err(ApiError::Cancelled) => {
            eprintln!("Interrupted.");
            std::process::exit(130);
        }
        Err(e) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }

    info!("Application exiting normally");
    Ok(())
}
