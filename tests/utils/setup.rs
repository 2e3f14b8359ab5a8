use axum::{extract::Path, http::StatusCode, routing::get, Router};
use std::collections::HashMap;
use std::sync::Arc;

use usageboard::{
    handlers, AggregationOptions, AppState, ColorResolver, DashboardController, DocumentSource,
    SectionAssembler, TeamColorPalette, ThresholdAggregator,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetupBuilder {
    cutoff_fraction: f64,
    palette: TeamColorPalette,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            cutoff_fraction: 1.0,
            palette: TeamColorPalette::mlb(),
        }
    }

    pub fn with_cutoff(mut self, cutoff_fraction: f64) -> Self {
        self.cutoff_fraction = cutoff_fraction;
        self
    }

    pub fn controller(self, source: Arc<dyn DocumentSource>) -> Arc<DashboardController> {
        let aggregator = ThresholdAggregator::new(AggregationOptions {
            cutoff_fraction: self.cutoff_fraction,
            ..AggregationOptions::default()
        })
        .unwrap();
        let assembler =
            SectionAssembler::new(Arc::new(ColorResolver::new(self.palette)), aggregator);
        Arc::new(DashboardController::new(source, assembler))
    }

    pub fn router(self, source: Arc<dyn DocumentSource>) -> Router {
        handlers::router(AppState::new(self.controller(source)))
    }
}

/// Serves `files` by name on a local port, 404 for anything else.
/// Returns the base URL.
pub async fn serve_static(files: HashMap<String, Vec<u8>>) -> String {
    let files = Arc::new(files);
    let app = Router::new().route(
        "/data/:name",
        get(move |Path(name): Path<String>| {
            let files = Arc::clone(&files);
            async move {
                match files.get(&name) {
                    Some(body) => Ok(body.clone()),
                    None => Err(StatusCode::NOT_FOUND),
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/data", addr)
}
