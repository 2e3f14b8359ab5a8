use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::{info, instrument, warn};

use crate::dashboard::Catalog;
use crate::render::{html, HtmlSink, JsonSink, RenderSink};
use crate::shared::{AppError, AppState};
use crate::usage::SectionKind;

/// Navigation parameters from the query string
#[derive(Debug, Default, Deserialize)]
pub struct UsageQuery {
    pub team: Option<String>,
    pub year: Option<String>,
    /// Comma separated section kinds to show as tables instead of bars
    pub table: Option<String>,
}

impl UsageQuery {
    fn table_sections(&self) -> Vec<SectionKind> {
        self.table
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|slug| SectionKind::from_str(slug.trim()).ok())
            .collect()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(team_index))
        .route("/team", get(team_page))
        .route("/api/index", get(usage_index))
        .route("/api/usage", get(usage_page))
        .with_state(state)
}

/// HTTP handler for the team/season selector
///
/// GET /
#[instrument(name = "team_index", skip(state))]
pub async fn team_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let catalog = state.controller.catalog().await?;
    info!(team_count = catalog.len(), "Listing available usage documents");
    Ok(Html(html::render_catalog(&catalog)))
}

/// HTTP handler for the dashboard page
///
/// GET /team?team=CHC&year=2025[&table=batting,pitching]
/// Failures still render a page carrying the fixed message
#[instrument(name = "team_page", skip(state))]
pub async fn team_page(
    State(state): State<AppState>,
    Query(query): Query<UsageQuery>,
) -> (StatusCode, Html<String>) {
    let result = state
        .controller
        .load(query.team.as_deref(), query.year.as_deref())
        .await;

    let sink = HtmlSink::new();
    let status = match result {
        Ok(mut page) => {
            let tables = query.table_sections();
            for section in page.sections.iter_mut().filter(|s| tables.contains(&s.kind)) {
                section.toggle();
            }
            sink.render_page(&page);
            StatusCode::OK
        }
        Err(err) => {
            warn!(error = %err, "Rendering dashboard failure page");
            sink.render_failure(&err);
            AppError::from(err).status()
        }
    };

    (status, Html(sink.take().unwrap_or_default()))
}

/// HTTP handler for the dashboard page model
///
/// GET /api/usage?team=CHC&year=2025
#[instrument(name = "usage_page", skip(state))]
pub async fn usage_page(
    State(state): State<AppState>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<Value>, AppError> {
    let sink = JsonSink::new();
    state
        .controller
        .present(query.team.as_deref(), query.year.as_deref(), &sink)
        .await?;

    let page = sink.take().ok_or(AppError::Internal)?;
    info!(
        team = ?query.team,
        year = ?query.year,
        "Dashboard page served"
    );
    Ok(Json(page))
}

/// HTTP handler for the document catalog
///
/// GET /api/index
/// Returns `{"CHC": [2024, 2025]}`
#[instrument(name = "usage_index", skip(state))]
pub async fn usage_index(State(state): State<AppState>) -> Result<Json<Catalog>, AppError> {
    Ok(Json(state.controller.catalog().await?))
}
