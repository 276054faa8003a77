use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod app_state;
mod config;
mod core;
mod domain;
mod errors;
mod routes;
mod scheduler;

use crate::api::routes::exposition_routes::exposition_router;
use crate::core::metrics::gauge_registry::GaugeRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let file_appender = tracing_appender::rolling::daily(config::log_dir(), "hostmon.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    let gauges = Arc::new(GaugeRegistry::new()?);

    // Sampler and exposition serve the backend; they run regardless of the
    // query API's traffic.
    tokio::spawn(scheduler::run(
        Arc::clone(&gauges),
        config::sample_interval_secs(),
    ));

    let exposition_addr = format!("0.0.0.0:{}", config::exposition_port());
    let exposition_listener = TcpListener::bind(&exposition_addr).await?;
    info!("Serving gauge exposition on http://{exposition_addr}/metrics");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(exposition_listener, exposition_router(gauges)).await {
            error!(?e, "Exposition server failed");
        }
    });

    let app = routes::app_router().with_state(app_state::build_app_state());

    let addr = format!("0.0.0.0:{}", config::http_port());
    let listener = TcpListener::bind(&addr).await?;
    info!("Serving usage API on http://{addr}");
    info!("Query backend at {}", config::backend_url());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(?e, "Failed to listen for shutdown signal"),
    }
}
