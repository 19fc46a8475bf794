//! Server binary: load settings, set up tracing, open the pool, initialize the schema, serve.
//! Any startup failure exits non-zero.

use axum_server::tls_rustls::RustlsConfig;
use materials_api::{
    app, ensure_database_exists, init_schema, store, telemetry, AppState, MaterialService, PgMaterialStore,
    Settings,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    telemetry::init(settings.environment);
    tracing::info!(environment = ?settings.environment, "logger initialized");

    if settings.create_database {
        ensure_database_exists(&settings.database_url).await?;
    }

    tracing::info!("connecting to database");
    let pool = store::connect(&settings.database_url, settings.pool).await?;

    if let Err(e) = init_schema(&pool).await {
        tracing::error!(error = %e, "database initialization failed");
        return Err(e.into());
    }

    let repo = Arc::new(PgMaterialStore::new(pool.clone()));
    let state = AppState {
        materials: MaterialService::new(repo),
    };
    let router = app(state, settings.request_timeout);

    match &settings.tls {
        Some(tls) => {
            let config = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file).await?;
            let handle = axum_server::Handle::new();
            tokio::spawn(drain_on_signal(handle.clone(), settings.request_timeout));
            tracing::info!(cert = %tls.cert_file.display(), "listening on {} (tls)", settings.bind_addr);
            axum_server::bind_rustls(settings.bind_addr, config)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
        None => {
            let listener = TcpListener::bind(settings.bind_addr).await?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    tracing::info!("server stopped, closing pool");
    pool.close().await;
    Ok(())
}

/// Stops accepting on SIGINT/SIGTERM and gives in-flight requests `grace` to finish.
async fn drain_on_signal(handle: axum_server::Handle, grace: Duration) {
    shutdown_signal().await;
    handle.graceful_shutdown(Some(grace));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
