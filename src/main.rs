use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use usageboard::{
    dashboard::{DocumentSource, FsDocumentSource, HttpDocumentSource},
    handlers, AppConfig, AppState, ColorResolver, DashboardController, SectionAssembler,
    TeamColorPalette, ThresholdAggregator,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "usageboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting team usage dashboard");

    let config = AppConfig::from_env();
    info!(?config, "Loaded configuration");

    let palette = match &config.palette_file {
        Some(path) => TeamColorPalette::from_json_file(path)?,
        None => TeamColorPalette::mlb(),
    };
    let resolver = Arc::new(ColorResolver::new(palette));
    let aggregator = ThresholdAggregator::new(config.aggregation)?;

    // Serve from a static host when configured, otherwise from the data directory
    let source: Arc<dyn DocumentSource> = match &config.data_url {
        Some(url) => Arc::new(HttpDocumentSource::new(url.clone())?),
        None => Arc::new(FsDocumentSource::new(config.data_dir.clone())),
    };

    let controller = DashboardController::new(source, SectionAssembler::new(resolver, aggregator));
    let app_state = AppState::new(Arc::new(controller));

    let app = handlers::router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
