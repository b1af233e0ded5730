//! gRPC server assembly

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tonic::transport::Server;
use tower::ServiceBuilder;

use ea_core::repositories::UserRepository;
use ea_core::services::{
    AuthService, EmailSender, PasswordHasher, UserEventPublisher, VerificationCodeStore,
};
use ea_shared::config::AppConfig;

use crate::handlers::AuthHandler;
use crate::middleware::{AuthLayer, RequestLogLayer};
use crate::proto::auth_service_server::AuthServiceServer;

/// Serves the auth and health services until `shutdown` resolves
///
/// Every call passes the request log layer, then the authentication layer,
/// then the per-call deadline.
pub async fn serve<U, H, P, C, E, F>(
    config: &AppConfig,
    auth: Arc<AuthService<U, H, P, C, E>>,
    shutdown: F,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
    P: UserEventPublisher + 'static,
    C: VerificationCodeStore + 'static,
    E: EmailSender + 'static,
    F: Future<Output = ()> + Send,
{
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<AuthServiceServer<AuthHandler<U, H, P, C, E>>>()
        .await;

    let auth_layer = AuthLayer::new(auth.token_service(), config.server.public_methods.clone());
    let handler = AuthHandler::new(auth, config.auth.duplicate_email_status);

    let layers = ServiceBuilder::new()
        .layer(RequestLogLayer::new())
        .layer(auth_layer)
        .into_inner();

    tracing::info!(
        %addr,
        public_methods = config.server.public_methods.len(),
        request_timeout = config.server.request_timeout,
        "gRPC server listening"
    );

    Server::builder()
        .timeout(Duration::from_secs(config.server.request_timeout))
        .layer(layers)
        .add_service(health_service)
        .add_service(AuthServiceServer::new(handler))
        .serve_with_shutdown(addr, shutdown)
        .await
        .context("gRPC server failed")?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
