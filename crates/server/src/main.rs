use std::future::IntoFuture;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use herald_media::{LocalArtifactResolver, MediaIngestor};
use herald_pipeline::{AnalyticsAggregator, Publisher};
use herald_server::api::AppState;
use herald_server::config::{ACCESS_TOKEN_ENV, HeraldConfig};

/// Herald publishing and analytics HTTP server.
#[derive(Parser, Debug)]
#[command(name = "herald-server", about = "HTTP server for Herald")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "herald.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_exists = Path::new(&cli.config).exists();
    let config: HeraldConfig = if config_exists {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };

    herald_server::telemetry::init(&config.logging);

    if !config_exists {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let platform = herald_server::platform_factory::create_platform(
        &config.platform,
        std::env::var(ACCESS_TOKEN_ENV).ok(),
    )?;
    let call_timeout = Duration::from_secs(config.platform.call_timeout_seconds);

    let ingestor = MediaIngestor::open(&config.media.temp_dir, config.media.max_bytes)?;
    let resolver = LocalArtifactResolver::new(std::env::current_dir()?, &config.media.public_dir);
    let publisher = Publisher::new(platform.clone(), call_timeout);
    let analytics = AnalyticsAggregator::new(platform, call_timeout)
        .with_window_days(config.analytics.window_days)
        .with_max_items(config.analytics.max_items);

    let state = AppState {
        ingestor,
        resolver,
        publisher,
        analytics,
    };
    let app = herald_server::api::router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "herald-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM. In-flight requests get
    // `shutdown_timeout_seconds` to finish once the signal arrives.
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(());
    });

    tokio::select! {
        result = server.into_future() => result?,
        () = async {
            let _ = signal_rx.await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded, dropping in-flight requests"
            );
        }
    }

    info!("herald-server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
