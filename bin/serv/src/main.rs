use anyhow::Context;
use lcms_api::{config::ApiConfig, state::ApiState};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()
        .context("missing configuration; ADMIN_PASSWORD and JWT_SECRET are required")?;

    lcms_api::tracing::init_tracing(&config.env);

    let addr = format!("0.0.0.0:{}", config.port);

    // Initialize the application state
    let state = ApiState::new(config);

    // Create the application router
    let app = lcms_api::router::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
