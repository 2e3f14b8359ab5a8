use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{SourceError, UsageKey};

/// Available documents: team code -> seasons, both sorted
pub type Catalog = BTreeMap<String, Vec<u16>>;

/// Where usage documents are fetched from
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Raw body of the document for `key`
    async fn fetch(&self, key: &UsageKey) -> Result<Vec<u8>, SourceError>;

    async fn catalog(&self) -> Result<Catalog, SourceError>;
}

fn insert_key(catalog: &mut Catalog, key: UsageKey) {
    let years = catalog.entry(key.team).or_default();
    if let Err(position) = years.binary_search(&key.year) {
        years.insert(position, key.year);
    }
}

/// Reads `{TEAM}_{YEAR}_usage.json` files from a data directory
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    #[instrument(skip(self))]
    async fn fetch(&self, key: &UsageKey) -> Result<Vec<u8>, SourceError> {
        if !key.is_valid() {
            return Err(SourceError::NotFound(key.to_string()));
        }
        let path = self.root.join(key.file_name());
        match tokio::fs::read(&path).await {
            Ok(body) => {
                debug!(path = %path.display(), bytes = body.len(), "Read usage document");
                Ok(body)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn catalog(&self) -> Result<Catalog, SourceError> {
        let mut catalog = Catalog::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            match name.to_str().and_then(UsageKey::from_file_name) {
                Some(key) => insert_key(&mut catalog, key),
                None => debug!(file = ?name, "Skipping non-document file"),
            }
        }
        Ok(catalog)
    }
}

/// Fetches documents from a static file host; the catalog is the host's
/// `index.json` in `{"CHC": [2024, 2025]}` form
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: Client,
    base_url: String,
}

impl HttpDocumentSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Document request failed");
            return Err(SourceError::Status {
                status: status.as_u16(),
                location: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    #[instrument(skip(self))]
    async fn fetch(&self, key: &UsageKey) -> Result<Vec<u8>, SourceError> {
        if !key.is_valid() {
            return Err(SourceError::NotFound(key.to_string()));
        }
        let url = self.url(&key.file_name());
        let body = self.get(&url).await?.bytes().await?;
        debug!(url = %url, bytes = body.len(), "Fetched usage document");
        Ok(body.to_vec())
    }

    #[instrument(skip(self))]
    async fn catalog(&self) -> Result<Catalog, SourceError> {
        let url = self.url("index.json");
        let listed: HashMap<String, Vec<u16>> = self.get(&url).await?.json().await?;

        let mut catalog = Catalog::new();
        for (team, years) in listed {
            if !UsageKey::is_valid_team(&team) {
                warn!(team = %team, "Skipping malformed team code in index");
                continue;
            }
            for year in years {
                insert_key(&mut catalog, UsageKey::new(&team, year));
            }
        }
        Ok(catalog)
    }
}

/// In-memory implementation of DocumentSource for development and testing
#[derive(Debug, Default)]
pub struct InMemoryDocumentSource {
    documents: RwLock<HashMap<UsageKey, Vec<u8>>>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, key: UsageKey, body: impl Into<Vec<u8>>) -> Self {
        self.documents.get_mut().insert(key, body.into());
        self
    }

    pub async fn insert(&self, key: UsageKey, body: impl Into<Vec<u8>>) {
        self.documents.write().await.insert(key, body.into());
    }
}

#[async_trait]
impl DocumentSource for InMemoryDocumentSource {
    async fn fetch(&self, key: &UsageKey) -> Result<Vec<u8>, SourceError> {
        self.documents
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(key.file_name()))
    }

    async fn catalog(&self) -> Result<Catalog, SourceError> {
        let mut catalog = Catalog::new();
        for key in self.documents.read().await.keys() {
            insert_key(&mut catalog, key.clone());
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_source_reads_document_by_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CHC_2025_usage.json"), b"{}").unwrap();

        let source = FsDocumentSource::new(dir.path());
        let body = source.fetch(&UsageKey::new("CHC", 2025)).await.unwrap();
        assert_eq!(body, b"{}");
    }

    #[tokio::test]
    async fn fs_source_reports_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsDocumentSource::new(dir.path());

        let result = source.fetch(&UsageKey::new("CHC", 1999)).await;
        assert!(matches!(result, Err(SourceError::NotFound(path)) if path.ends_with("CHC_1999_usage.json")));
    }

    #[tokio::test]
    async fn fs_source_stays_inside_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(dir.path().join("SECRET_2025_usage.json"), b"leaked").unwrap();

        let source = FsDocumentSource::new(&data);
        for team in ["../SECRET", "/SECRET", "..\\SECRET"] {
            let result = source.fetch(&UsageKey::new(team, 2025)).await;
            assert!(matches!(result, Err(SourceError::NotFound(_))), "{team}");
        }
    }

    #[tokio::test]
    async fn fs_catalog_lists_documents_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "CHC_2025_usage.json",
            "CHC_2024_usage.json",
            "NYY_2025_usage.json",
            "index.json",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), b"{}").unwrap();
        }

        let catalog = FsDocumentSource::new(dir.path()).catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["CHC"], vec![2024, 2025]);
        assert_eq!(catalog["NYY"], vec![2025]);
    }

    #[tokio::test]
    async fn in_memory_source_serves_inserted_documents() {
        let source = InMemoryDocumentSource::new()
            .with_document(UsageKey::new("SEA", 2023), "{}");
        source.insert(UsageKey::new("SEA", 2024), "{}").await;

        assert!(source.fetch(&UsageKey::new("SEA", 2024)).await.is_ok());
        assert!(matches!(
            source.fetch(&UsageKey::new("SEA", 2022)).await,
            Err(SourceError::NotFound(_))
        ));
        assert_eq!(source.catalog().await.unwrap()["SEA"], vec![2023, 2024]);
    }

    #[test]
    fn http_source_joins_base_url() {
        let source = HttpDocumentSource::new("https://stats.example.com/data/").unwrap();
        assert_eq!(
            source.url(&UsageKey::new("CHC", 2025).file_name()),
            "https://stats.example.com/data/CHC_2025_usage.json"
        );
    }
}
