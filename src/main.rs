use std::sync::Arc;

use match_insights::{api, AppState, Config, HttpRecordSource};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "match_insights=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        results_service = %config.results_service_url,
        "Starting match insights service"
    );

    let source = HttpRecordSource::new(&config.results_service_url, config.fetch_timeout)?;
    let app_state = AppState::new(Arc::new(source));

    // Warm the store; an unreachable results service only means "unavailable"
    if let Err(err) = app_state.store.refresh(app_state.source.as_ref()).await {
        warn!(%err, "Initial results fetch failed");
    }

    let app = api::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
