pub mod html;

use serde_json::{json, Value};
use std::sync::Mutex;
use tracing::warn;

use crate::dashboard::{DashboardError, DashboardPage};

/// Receives the outcome of a dashboard load
pub trait RenderSink: Send + Sync {
    fn render_page(&self, page: &DashboardPage);
    fn render_failure(&self, error: &DashboardError);
}

/// Sink that renders into an HTML document held in memory
#[derive(Debug, Default)]
pub struct HtmlSink {
    output: Mutex<Option<String>>,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered document, if anything was committed
    pub fn take(&self) -> Option<String> {
        self.output.lock().unwrap().take()
    }
}

impl RenderSink for HtmlSink {
    fn render_page(&self, page: &DashboardPage) {
        *self.output.lock().unwrap() = Some(html::render_page(page));
    }

    fn render_failure(&self, error: &DashboardError) {
        *self.output.lock().unwrap() = Some(html::render_failure(error));
    }
}

/// Sink that keeps the page model as JSON; failures become `{"error": msg}`
#[derive(Debug, Default)]
pub struct JsonSink {
    output: Mutex<Option<Value>>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<Value> {
        self.output.lock().unwrap().take()
    }
}

impl RenderSink for JsonSink {
    fn render_page(&self, page: &DashboardPage) {
        match serde_json::to_value(page) {
            Ok(value) => *self.output.lock().unwrap() = Some(value),
            Err(err) => warn!(key = %page.key(), error = %err, "Failed to serialize dashboard page"),
        }
    }

    fn render_failure(&self, error: &DashboardError) {
        *self.output.lock().unwrap() = Some(json!({ "error": error.to_string() }));
    }
}
