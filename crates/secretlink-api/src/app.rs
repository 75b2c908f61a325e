//! Application builder: wires repositories, services, and middleware into
//! an Axum app, and runs it until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::future::IntoFuture;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use secretlink_auth::{
    AuthResolver, PasswordHasher, PasswordValidator, SessionDecoder, SessionEncoder,
};
use secretlink_core::config::AppConfig;
use secretlink_core::error::AppError;
use secretlink_crypto::{Keyring, LinkCodec};
use secretlink_database::DatabasePool;
use secretlink_database::repositories::{ApiTokenRepository, LinkRepository, UserRepository};
use secretlink_service::{LinkService, TokenService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Constructs every repository and service over `db`.
pub fn build_state(config: AppConfig, db: DatabasePool, keyring: Keyring) -> AppState {
    let pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────
    let link_repo = Arc::new(LinkRepository::new(pool.clone()));
    let token_repo = Arc::new(ApiTokenRepository::new(pool.clone()));
    let user_repo = Arc::new(UserRepository::new(pool));

    // ── Auth ─────────────────────────────────────────────────
    let session_encoder = Arc::new(SessionEncoder::new(&config.session));
    let resolver = Arc::new(AuthResolver::new(
        SessionDecoder::new(&config.session),
        token_repo.as_ref().clone(),
    ));
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));

    // ── Services ─────────────────────────────────────────────
    let codec = Arc::new(LinkCodec::new(Arc::new(keyring)));
    let link_service = Arc::new(LinkService::new(
        db.clone(),
        Arc::clone(&link_repo),
        codec,
        Arc::new(config.server.clone()),
        Arc::new(config.links.clone()),
    ));
    let token_service = Arc::new(TokenService::new(Arc::clone(&token_repo)));
    let user_service = Arc::new(UserService::new(
        db.clone(),
        Arc::clone(&user_repo),
        password_hasher,
        password_validator,
        session_encoder,
    ));

    AppState {
        config: Arc::new(config),
        db,
        resolver,
        link_service,
        token_service,
        user_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serves the API until Ctrl+C or SIGTERM, then drains in-flight requests
/// for at most `server.shutdown_grace_seconds`.
pub async fn run_server(
    config: AppConfig,
    db: DatabasePool,
    keyring: Keyring,
) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(build_state(config, db.clone(), keyring));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "SecretLink server listening");

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    })
    .into_future();

    let deadline = async move {
        if stop_rx.wait_for(|stopped| *stopped).await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        () = deadline => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, dropping connections");
        }
    }

    db.close().await;
    info!("SecretLink server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
