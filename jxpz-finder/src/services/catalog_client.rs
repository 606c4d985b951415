//! Remote catalog access
//!
//! The catalog is a black-box paginated source. `CatalogSource` is the seam
//! the page fetcher depends on; `HttpCatalog` talks to the jx3box CMS
//! `pz` endpoint:
//!
//! `GET {base_url}?per={per_page}&client={client}&valid=1&mount={mount}[&page={n}]`
//!
//! Response body: `{"data": {"pages": N, "list": [...]}}`

use async_trait::async_trait;
use jxpz_common::config::CatalogConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("jxpz-finder/", env!("CARGO_PKG_VERSION"));

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Paginated record source
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Total number of pages for a mount at the source's fixed page size
    async fn page_count(&self, mount: &str) -> Result<u32, CatalogError>;

    /// Raw list items of one page (1-indexed)
    async fn fetch_page(&self, mount: &str, page: u32) -> Result<Vec<Value>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct PagesData {
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(default)]
    list: Vec<Value>,
}

/// jx3box CMS catalog over HTTP
pub struct HttpCatalog {
    http_client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn query(&self, mount: &str, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("per", self.config.per_page.to_string()),
            ("client", self.config.client.clone()),
            ("valid", "1".to_string()),
            ("mount", mount.to_string()),
        ];
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        query
    }

    async fn get<T>(&self, mount: &str, page: Option<u32>) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            mount = %mount,
            page = ?page,
            url = %self.config.base_url,
            "Querying catalog"
        );

        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&self.query(mount, page))
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status(status.as_u16(), error_text));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn page_count(&self, mount: &str) -> Result<u32, CatalogError> {
        let data: PagesData = self.get(mount, None).await?;
        Ok(data.pages)
    }

    async fn fetch_page(&self, mount: &str, page: u32) -> Result<Vec<Value>, CatalogError> {
        let data: ListData = self.get(mount, Some(page)).await?;
        Ok(data.list)
    }
}
