//! Page Fetcher
//!
//! Retrieves every page of a mount concurrently and merges them into one
//! validated record collection.
//!
//! **Algorithm:**
//! 1. Ask the catalog for the mount's page count
//! 2. Request pages 1..=count all at once (no throttling, no batching)
//! 3. Wait for every page; any failure fails the whole fetch (no partial results, no retry)
//! 4. Concatenate page lists (order follows page index, but callers must not rely on it)
//! 5. Decode and validate, dropping malformed records
//!
//! The fetcher never touches the mount cache.

use futures::future::join_all;
use jxpz_common::Record;
use std::sync::Arc;
use tracing::{debug, info};

use super::catalog_client::CatalogSource;
use super::record_validator::RecordValidator;
use crate::error::FetchError;

/// Fetches and validates all records of a mount
pub struct PageFetcher {
    source: Arc<dyn CatalogSource>,
    validator: RecordValidator,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn CatalogSource>, validator: RecordValidator) -> Self {
        Self { source, validator }
    }

    /// Fetch every page of `mount` and return the valid records
    pub async fn fetch_all(&self, mount: &str) -> Result<Vec<Record>, FetchError> {
        let fetch_error = |source| FetchError {
            mount: mount.to_string(),
            source,
        };

        let pages = self.source.page_count(mount).await.map_err(fetch_error)?;
        debug!(mount = %mount, pages, "Discovered page count");

        // join_all (not try_join_all): in-flight pages run to completion even
        // after another page has failed.
        let responses = join_all((1..=pages).map(|page| {
            let source = Arc::clone(&self.source);
            async move {
                let result = source.fetch_page(mount, page).await;
                debug!(mount = %mount, page, ok = result.is_ok(), "Page request finished");
                result
            }
        }))
        .await;

        let mut raw = Vec::new();
        for response in responses {
            raw.extend(response.map_err(fetch_error)?);
        }

        let raw_count = raw.len();
        let records = self.validator.decode_valid(raw);

        info!(
            mount = %mount,
            pages,
            raw = raw_count,
            valid = records.len(),
            dropped = raw_count - records.len(),
            "Fetched mount records"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog_client::CatalogError;
    use crate::services::mock::MockCatalog;
    use jxpz_common::{AttributeSpec, AttributeTable};
    use serde_json::{json, Value};

    fn validator() -> RecordValidator {
        RecordValidator::new(
            AttributeTable::new(vec![
                AttributeSpec::new("atk", "Attack"),
                AttributeSpec::new("crit", "Crit"),
            ])
            .unwrap(),
        )
    }

    fn item(id: i64, atk: f64, crit: f64) -> Value {
        json!({
            "id": id,
            "title": format!("pz-{}", id),
            "overview": { "attrs": { "atk": atk, "crit": crit } }
        })
    }

    fn three_pages() -> MockCatalog {
        MockCatalog::new().with_mount(
            "m1",
            vec![
                vec![item(1, 100.0, 50.0), item(2, 90.0, 60.0)],
                vec![
                    item(3, 80.0, 40.0),
                    json!({ "id": 4, "overview": { "attrs": { "atk": 1 } } }),
                ],
                vec![item(5, 70.0, 70.0)],
            ],
        )
    }

    #[tokio::test]
    async fn test_fetch_all_merges_and_validates() {
        let source = Arc::new(three_pages());
        let fetcher = PageFetcher::new(source.clone(), validator());

        let records = fetcher.fetch_all("m1").await.unwrap();

        let mut titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["pz-1", "pz-2", "pz-3", "pz-5"]);
        assert_eq!(source.count_calls(), 1);
        assert_eq!(source.page_calls(), 3);
    }

    #[tokio::test]
    async fn test_zero_pages_issues_no_page_requests() {
        let source = Arc::new(MockCatalog::new());
        let fetcher = PageFetcher::new(source.clone(), validator());

        let records = fetcher.fetch_all("empty").await.unwrap();
        assert!(records.is_empty());
        assert_eq!(source.page_calls(), 0);
    }

    #[tokio::test]
    async fn test_any_page_failure_fails_fetch() {
        let source = Arc::new(three_pages());
        source.fail_page("m1", 2);
        let fetcher = PageFetcher::new(source.clone(), validator());

        let err = fetcher.fetch_all("m1").await.unwrap_err();
        assert_eq!(err.mount, "m1");
        assert!(matches!(err.source, CatalogError::Status(500, _)));
        // Every page was still requested.
        assert_eq!(source.page_calls(), 3);
    }
}
