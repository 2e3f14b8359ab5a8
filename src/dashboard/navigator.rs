use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::DashboardController;
use crate::render::RenderSink;

/// The team/year a navigation asked for, exactly as requested
#[derive(Debug, Clone, PartialEq, Eq)]
struct NavigationTarget {
    team: Option<String>,
    year: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Rendered,
    Failed,
    /// A newer navigation started before this one resolved; nothing was committed
    Stale,
}

/// Drives loads for a single viewer and keeps late results off the sink
pub struct Navigator {
    controller: Arc<DashboardController>,
    sink: Arc<dyn RenderSink>,
    current: RwLock<Option<NavigationTarget>>,
}

impl Navigator {
    pub fn new(controller: Arc<DashboardController>, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            controller,
            sink,
            current: RwLock::new(None),
        }
    }

    /// Makes (team, year) the current target, loads it, and commits the
    /// result only if the target has not changed in the meantime
    #[instrument(skip(self))]
    pub async fn navigate(&self, team: Option<&str>, year: Option<&str>) -> NavigationOutcome {
        let target = NavigationTarget {
            team: team.map(str::to_string),
            year: year.map(str::to_string),
        };
        *self.current.write().await = Some(target.clone());

        let result = self.controller.load(team, year).await;

        // Guard stays held through the commit
        let current = self.current.read().await;
        if current.as_ref() != Some(&target) {
            debug!(?target, "Discarding stale dashboard result");
            return NavigationOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.sink.render_page(&page);
                NavigationOutcome::Rendered
            }
            Err(err) => {
                self.sink.render_failure(&err);
                NavigationOutcome::Failed
            }
        }
    }
}
