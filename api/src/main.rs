use ea_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {}", e);
        }
    }

    let config = AppConfig::from_env()?;
    ea_api::logging::init(&config.logging);

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage,
        "Starting EduAuth gRPC server"
    );

    ea_api::app::run(config).await
}
