use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{Catalog, DashboardError, DashboardPage, DocumentSource, SourceError, UsageKey};
use crate::render::RenderSink;
use crate::usage::{SectionAssembler, TeamYearUsageDocument};

/// Loads a team/season document and turns it into a dashboard page
pub struct DashboardController {
    source: Arc<dyn DocumentSource>,
    assembler: SectionAssembler,
}

impl DashboardController {
    pub fn new(source: Arc<dyn DocumentSource>, assembler: SectionAssembler) -> Self {
        Self { source, assembler }
    }

    /// One load attempt for the requested team and year.
    ///
    /// Parameters are validated before the source is touched, and the source
    /// is fetched at most once. Any fetch or parse failure is reported as
    /// `DataUnavailable` naming the request as given.
    #[instrument(skip(self))]
    pub async fn load(
        &self,
        team: Option<&str>,
        year: Option<&str>,
    ) -> Result<DashboardPage, DashboardError> {
        let key = UsageKey::from_params(team, year).inspect_err(|err| {
            warn!(error = %err, "Rejected dashboard parameters");
        })?;

        let unavailable = |reason: String| {
            DashboardError::unavailable(team.unwrap_or_default(), year.unwrap_or_default(), reason)
        };

        let body = self.source.fetch(&key).await.map_err(|err| {
            warn!(key = %key, error = %err, "Usage document unavailable");
            unavailable(err.to_string())
        })?;

        let document = TeamYearUsageDocument::from_slice(&body).map_err(|err| {
            warn!(key = %key, error = %err, "Usage document failed validation");
            unavailable(err.to_string())
        })?;
        check_echo(&key, &document);
        if document.is_empty() {
            warn!(key = %key, "Usage document carries no usage groups");
        }

        let sections = self.assembler.assemble_sections(&document, &key.team);
        let seasons = self.seasons(&key.team).await;
        info!(key = %key, section_count = sections.len(), "Dashboard loaded");

        Ok(DashboardPage {
            team: key.team,
            year: key.year,
            seasons,
            sections,
            generated_at: Utc::now(),
        })
    }

    /// Seasons the catalog lists for `team`. The page still renders without
    /// them, so a catalog failure only costs the season links.
    async fn seasons(&self, team: &str) -> Vec<u16> {
        match self.source.catalog().await {
            Ok(mut catalog) => catalog.remove(team).unwrap_or_default(),
            Err(err) => {
                warn!(team = %team, error = %err, "Catalog unavailable, omitting season links");
                Vec::new()
            }
        }
    }

    /// Loads and hands the page, or the failure message, to `sink`
    pub async fn present(
        &self,
        team: Option<&str>,
        year: Option<&str>,
        sink: &dyn RenderSink,
    ) -> Result<(), DashboardError> {
        match self.load(team, year).await {
            Ok(page) => {
                sink.render_page(&page);
                Ok(())
            }
            Err(err) => {
                sink.render_failure(&err);
                Err(err)
            }
        }
    }

    pub async fn catalog(&self) -> Result<Catalog, SourceError> {
        self.source.catalog().await
    }
}

/// Generated documents repeat their team and year; a mismatch means the file
/// was misnamed, which is worth a warning but still renders.
fn check_echo(key: &UsageKey, document: &TeamYearUsageDocument) {
    if let Some(team) = &document.team {
        if !team.eq_ignore_ascii_case(&key.team) {
            warn!(key = %key, document_team = %team, "Document team does not match request");
        }
    }
    if let Some(year) = document.year {
        if year != key.year {
            warn!(key = %key, document_year = year, "Document year does not match request");
        }
    }
}
