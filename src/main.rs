use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sakhi_binding::db::ClinicStorage;
use sakhi_binding::router::{BindingState, binding_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &sakhi_binding::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.listen_addr,
        backend_url = %cfg.backend_url,
        database_url = %cfg.database_url,
        upstream_timeout_secs = cfg.upstream_timeout_secs,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel
    );

    let storage = ClinicStorage::connect(&cfg.database_url).await?;
    let state = BindingState::from_config(cfg, storage)?;
    let app = binding_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("Binding Layer running on {}", cfg.listen_addr);
    info!("Proxying to Sakhi Backend at {}", cfg.backend_url);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
