use anyhow::Context;
use coursehub::logging::init_tracing;
use coursehub::metrics::{init_metrics, metrics_app};
use coursehub::router::init_router;
use coursehub::state::init_app_state;
use coursehub_config::ServerConfig;
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize tracing")?;

    let server_config = ServerConfig::from_env().context("Invalid server configuration")?;
    let state = init_app_state().await?;

    if let Some(handle) = init_metrics().context("Failed to install metrics recorder")? {
        let metrics_address = format!("{}:{}", server_config.host, server_config.metrics_port);
        let listener = tokio::net::TcpListener::bind(&metrics_address)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {metrics_address}"))?;
        info!(address = %metrics_address, "Metrics available at /metrics");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
