mod api;
mod catalog;
mod middleware;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, build_cors, AppState},
    catalog::CatalogSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = catalog_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if !config.data_path.exists() {
        tracing::warn!(
            path = %config.data_path.display(),
            "product data file not found; catalog routes will fail until it exists"
        );
    }

    if config.allows_any_origin() && config.env == catalog_core::Environment::Production {
        tracing::warn!("CORS allows any origin in production");
    }

    let cors = build_cors(&config.cors_origins)?;
    let app = build_app(
        AppState {
            catalog: CatalogSource::new(config.data_path.clone()),
        },
        cors,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        data = %config.data_path.display(),
        "catalog api listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
