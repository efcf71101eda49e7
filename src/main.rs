use anyhow::Context;
use gridsource::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_config(&ConfigService::from_env())?;
    gridsource::logging::init_tracing(config.log_format);

    tracing::info!("Starting gridsource...");

    let mut container = ContainerBuilder::new().register(config.clone()).build();
    ProductModule::register(&mut container)?;

    let router = build_router(&container)?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
