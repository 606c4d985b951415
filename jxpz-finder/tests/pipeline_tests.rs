//! Integration tests for the search pipeline
//!
//! cache → requirement filter → Pareto engine over an in-process catalog

mod helpers;

use helpers::{abc_catalog, pz, FakeCatalog};
use jxpz_common::{AttributeTable, OptimizeSet, Record, Requirement};
use jxpz_finder::services::{
    DominanceKind, InMemoryStore, MountCache, PageFetcher, RecordValidator, SearchService,
};
use std::sync::Arc;
use std::time::Duration;

fn search_over(source: Arc<FakeCatalog>, single_flight: bool) -> SearchService {
    let fetcher = PageFetcher::new(source, RecordValidator::new(AttributeTable::jx3_origin()));
    let cache = MountCache::new(fetcher, Arc::new(InMemoryStore::new()))
        .with_single_flight(single_flight);
    SearchService::new(cache)
}

fn sorted_titles(records: &[Record]) -> Vec<String> {
    let mut titles: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
    titles.sort();
    titles
}

fn atk_crit() -> OptimizeSet {
    ["attack", "critialPercent"].into_iter().collect()
}

#[tokio::test]
async fn test_frontier_over_two_attributes() {
    let search = search_over(Arc::new(abc_catalog()), false);

    let results = search
        .search("m1", &Requirement::new(), &atk_crit())
        .await
        .unwrap();

    assert_eq!(sorted_titles(&results), vec!["A", "B"]);
}

#[tokio::test]
async fn test_requirement_then_frontier() {
    let search = search_over(Arc::new(abc_catalog()), false);

    let results = search
        .search("m1", &Requirement::new().with("attack", 95.0), &OptimizeSet::new())
        .await
        .unwrap();
    assert_eq!(sorted_titles(&results), vec!["A"]);

    let results = search
        .search(
            "m1",
            &Requirement::new().with("critialPercent", 0.45),
            &atk_crit(),
        )
        .await
        .unwrap();
    assert_eq!(sorted_titles(&results), vec!["A", "B"]);
}

#[tokio::test]
async fn test_incomplete_records_never_surface() {
    let search = search_over(Arc::new(abc_catalog()), false);

    let everything = search
        .search("m1", &Requirement::new(), &OptimizeSet::new())
        .await
        .unwrap();

    assert_eq!(sorted_titles(&everything), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_unsatisfiable_requirement_yields_empty() {
    let search = search_over(Arc::new(abc_catalog()), false);

    let results = search
        .search("m1", &Requirement::new().with("attack", 1e9), &atk_crit())
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_classic_dominance_selectable() {
    let source = FakeCatalog::new().with_mount(
        "m2",
        vec![vec![pz(1, "A", 100.0, 0.50), pz(2, "D", 100.0, 0.45)]],
    );
    let search = search_over(Arc::new(source), false);

    let strict = search
        .search_with("m2", &Requirement::new(), &atk_crit(), DominanceKind::StrictOnAll)
        .await
        .unwrap();
    assert_eq!(sorted_titles(&strict), vec!["A", "D"]);

    let classic = search
        .search_with("m2", &Requirement::new(), &atk_crit(), DominanceKind::Classic)
        .await
        .unwrap();
    assert_eq!(sorted_titles(&classic), vec!["A"]);
}

#[tokio::test]
async fn test_page_failure_rejects_and_is_retried() {
    let source = Arc::new(abc_catalog());
    source.fail_page("m1", 2);
    let search = search_over(source.clone(), false);

    let err = search
        .search("m1", &Requirement::new(), &atk_crit())
        .await
        .unwrap_err();
    assert_eq!(err.mount, "m1");
    assert!(!search.cache().store().contains("m1").await);
    assert_eq!(source.page_calls(), 3);

    source.heal();
    let results = search
        .search("m1", &Requirement::new(), &atk_crit())
        .await
        .unwrap();
    assert_eq!(sorted_titles(&results), vec!["A", "B"]);
    assert_eq!(source.count_calls(), 2);
    assert_eq!(source.page_calls(), 6);
}

#[tokio::test]
async fn test_repeat_searches_use_cache() {
    let source = Arc::new(abc_catalog());
    let search = search_over(source.clone(), false);

    for _ in 0..5 {
        search
            .search("m1", &Requirement::new().with("attack", 85.0), &atk_crit())
            .await
            .unwrap();
    }

    assert_eq!(source.count_calls(), 1);
    assert_eq!(source.page_calls(), 3);

    let first = search.cache().get_or_fetch("m1").await.unwrap();
    let second = search.cache().get_or_fetch("m1").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    // Filtering never mutates the cached collection.
    assert_eq!(first.len(), 3);
}

#[tokio::test]
async fn test_concurrent_misses_fetch_independently_by_default() {
    let source = Arc::new(abc_catalog().with_page_delay(Duration::from_millis(50)));
    let search = search_over(source.clone(), false);

    let (a, b) = tokio::join!(
        search.cache().get_or_fetch("m1"),
        search.cache().get_or_fetch("m1"),
    );

    assert_eq!(a.unwrap().len(), 3);
    assert_eq!(b.unwrap().len(), 3);
    assert_eq!(source.count_calls(), 2);
    assert_eq!(source.page_calls(), 6);
    assert_eq!(search.cache().store().len().await, 1);
}

#[tokio::test]
async fn test_single_flight_deduplicates_concurrent_misses() {
    let source = Arc::new(abc_catalog().with_page_delay(Duration::from_millis(50)));
    let search = search_over(source.clone(), true);

    let (a, b) = tokio::join!(
        search.cache().get_or_fetch("m1"),
        search.cache().get_or_fetch("m1"),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(source.count_calls(), 1);
    assert_eq!(source.page_calls(), 3);
}

#[tokio::test]
async fn test_single_flight_retries_after_failure() {
    let source = Arc::new(abc_catalog());
    source.fail_page("m1", 3);
    let search = search_over(source.clone(), true);

    assert!(search.cache().get_or_fetch("m1").await.is_err());

    source.heal();
    assert_eq!(search.cache().get_or_fetch("m1").await.unwrap().len(), 3);
    assert_eq!(source.count_calls(), 2);
}

#[tokio::test]
async fn test_mounts_are_cached_independently() {
    let source = Arc::new(
        abc_catalog().with_mount("m2", vec![vec![pz(7, "Z", 1.0, 0.01)]]),
    );
    let search = search_over(source.clone(), false);

    search.cache().get_or_fetch("m1").await.unwrap();
    search.cache().get_or_fetch("m2").await.unwrap();

    assert_eq!(
        search.cache().store().mounts().await,
        vec![("m1".to_string(), 3), ("m2".to_string(), 1)]
    );
}
