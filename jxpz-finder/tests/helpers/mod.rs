//! Shared test helpers: an in-process catalog and record builders

#![allow(dead_code)]

use async_trait::async_trait;
use jxpz_finder::services::{CatalogError, CatalogSource};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Catalog backed by canned pages, with failure injection and call counters
#[derive(Default)]
pub struct FakeCatalog {
    pages: HashMap<String, Vec<Vec<Value>>>,
    failing_pages: Mutex<HashSet<(String, u32)>>,
    page_delay: Option<Duration>,
    count_calls: AtomicUsize,
    page_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount(mut self, mount: &str, pages: Vec<Vec<Value>>) -> Self {
        self.pages.insert(mount.to_string(), pages);
        self
    }

    /// Delay every page response so concurrent callers overlap
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    pub fn fail_page(&self, mount: &str, page: u32) {
        self.failing_pages
            .lock()
            .unwrap()
            .insert((mount.to_string(), page));
    }

    pub fn heal(&self) {
        self.failing_pages.lock().unwrap().clear();
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn page_count(&self, mount: &str) -> Result<u32, CatalogError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.get(mount).map(|p| p.len() as u32).unwrap_or(0))
    }

    async fn fetch_page(&self, mount: &str, page: u32) -> Result<Vec<Value>, CatalogError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.page_delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failing_pages
            .lock()
            .unwrap()
            .contains(&(mount.to_string(), page));
        if failing {
            return Err(CatalogError::Network(format!("connection reset on page {}", page)));
        }

        Ok(self
            .pages
            .get(mount)
            .and_then(|p| p.get(page as usize - 1))
            .cloned()
            .unwrap_or_default())
    }
}

/// Full jx3 "origin" record with the given attack and crit, other attributes fixed
pub fn pz(id: i64, title: &str, attack: f64, critial_percent: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": {
            "score": 100000 + id,
            "attrs": {
                "attack": attack,
                "hitPercent": 0.2,
                "strainPercent": 0.3,
                "critialPercent": critial_percent,
                "criticalDamagePercent": 1.8,
                "overcome": 20000,
                "toughnessPercent": 0.0,
                "decriticalDamagePercent": 0.04
            }
        }
    })
}

/// Record missing `overcome`
pub fn incomplete_pz(id: i64) -> Value {
    json!({
        "id": id,
        "title": "incomplete",
        "overview": {
            "score": 1,
            "attrs": {
                "attack": 99999,
                "hitPercent": 0.2,
                "strainPercent": 0.3,
                "critialPercent": 0.9,
                "criticalDamagePercent": 1.8,
                "toughnessPercent": 0.0,
                "decriticalDamagePercent": 0.04
            }
        }
    })
}

/// Three pages for mount "m1":
/// A(atk 100, crit 0.50), B(90, 0.60), C(80, 0.40), plus one incomplete record
pub fn abc_catalog() -> FakeCatalog {
    FakeCatalog::new().with_mount(
        "m1",
        vec![
            vec![pz(1, "A", 100.0, 0.50)],
            vec![pz(2, "B", 90.0, 0.60), incomplete_pz(9)],
            vec![pz(3, "C", 80.0, 0.40)],
        ],
    )
}
