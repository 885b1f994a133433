pub mod api;
pub mod core;
pub mod providers;

pub use crate::core::{config, log};

use crate::config::AppConfig;
use crate::core::{CurrencyRateProvider, fetch_eur_usd_rate};
use anyhow::{Context, Result};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub enum AppCommand {
    /// Run the HTTP service, optionally overriding the configured listen address.
    Serve { listen_addr: Option<String> },
    /// Fetch the EUR/USD rate once and print it.
    Rate,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxproxy starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = Arc::new(providers::FrankfurterProvider::new(
        config.frankfurter_base_url(),
    ));

    match command {
        AppCommand::Serve { listen_addr } => {
            let addr = listen_addr.as_deref().unwrap_or(&config.server.listen_addr);
            let cors = api::cors_layer(&config.cors)?;
            let app = api::create_router(provider, cors);

            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            serve(listener, app, shutdown_signal()).await
        }
        AppCommand::Rate => print_rate(provider.as_ref()).await,
    }
}

/// Serves `app` on `listener` until `shutdown` resolves; in-flight requests
/// are allowed to finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(%addr, "fxproxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("fxproxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

async fn print_rate(provider: &dyn CurrencyRateProvider) -> Result<()> {
    let result = fetch_eur_usd_rate(provider).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
