use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use usageboard::dashboard::{Catalog, InMemoryDocumentSource, SourceError};
use usageboard::{DashboardError, DashboardPage, DocumentSource, RenderSink, UsageKey};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Document source that counts fetches
#[derive(Default)]
pub struct CountingSource {
    inner: InMemoryDocumentSource,
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: InMemoryDocumentSource) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for CountingSource {
    async fn fetch(&self, key: &UsageKey) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(key).await
    }

    async fn catalog(&self) -> Result<Catalog, SourceError> {
        self.inner.catalog().await
    }
}

/// Document source that holds fetches for one key until released
pub struct GatedSource {
    inner: InMemoryDocumentSource,
    gated: UsageKey,
    started: Notify,
    release: Notify,
}

impl GatedSource {
    pub fn new(inner: InMemoryDocumentSource, gated: UsageKey) -> Self {
        Self {
            inner,
            gated,
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Resolves once a fetch for the gated key is in flight
    pub async fn wait_until_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl DocumentSource for GatedSource {
    async fn fetch(&self, key: &UsageKey) -> Result<Vec<u8>, SourceError> {
        if *key == self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.inner.fetch(key).await
    }

    async fn catalog(&self) -> Result<Catalog, SourceError> {
        self.inner.catalog().await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Page(UsageKey),
    Failure(String),
}

/// Sink that records every commit
#[derive(Default)]
pub struct RecordingSink {
    rendered: Mutex<Vec<Rendered>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().unwrap().clone()
    }
}

impl RenderSink for RecordingSink {
    fn render_page(&self, page: &DashboardPage) {
        self.rendered.lock().unwrap().push(Rendered::Page(page.key()));
    }

    fn render_failure(&self, error: &DashboardError) {
        self.rendered
            .lock()
            .unwrap()
            .push(Rendered::Failure(error.to_string()));
    }
}
