//! End-to-end tests of the fan-out/fan-in engine against a mock registry

use super::*;

use aurs_core::types::SearchField;
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(name: &str) -> serde_json::Value {
    json!({
        "Name": name,
        "Version": "1.0.0-1",
        "Description": format!("{name} description"),
        "Maintainer": "tester",
        "NumVotes": 42,
        "Popularity": 1.5,
        "URL": "https://example.com"
    })
}

fn envelope(entries: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "version": 5,
        "type": "search",
        "resultcount": entries.len(),
        "results": entries
    })
}

async fn mount_search_term(server: &MockServer, term: &str, entries: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(query_param("type", "search"))
        .and(query_param("arg", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(entries)))
        .expect(1)
        .mount(server)
        .await;
}

fn engine_for(server: &MockServer) -> (SearchEngine, Arc<SearchCache>) {
    let client = Arc::new(RpcClient::with_base_url(server.uri()).unwrap());
    let cache = Arc::new(SearchCache::new());
    let engine = SearchEngine::new(client, Arc::clone(&cache));
    (engine, cache)
}

fn search_request(terms: &[&str]) -> SearchRequest {
    SearchRequest::search(
        terms.iter().map(|t| t.to_string()).collect(),
        SearchField::Name,
    )
}

#[tokio::test]
async fn fan_out_merges_results_from_all_terms() {
    let server = MockServer::start().await;
    mount_search_term(&server, "foo", vec![entry("foo-one"), entry("foo-two")]).await;
    mount_search_term(&server, "bar", vec![entry("bar-one")]).await;

    let (engine, _cache) = engine_for(&server);
    let results = engine.run(&search_request(&["foo", "bar"])).await;

    assert_eq!(results.len(), 3);

    // Relative order across terms is unspecified, but within one term the
    // server-returned order is preserved.
    let foo_results: Vec<_> = results
        .iter()
        .filter(|p| p.name.starts_with("foo"))
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(foo_results, ["foo-one", "foo-two"]);
}

#[tokio::test]
async fn fresh_cache_entry_replays_without_network() {
    let server = MockServer::start().await;
    // expect(1) is verified on drop: a second network call fails the test
    mount_search_term(&server, "foo", vec![entry("foo-one"), entry("foo-two")]).await;

    let (engine, _cache) = engine_for(&server);
    let request = search_request(&["foo"]);

    let first = engine.run(&request).await;
    let second = engine.run(&request).await;

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn limit_caps_emission_but_cache_stores_full_set() {
    let server = MockServer::start().await;
    let entries: Vec<_> = (0..10).map(|i| entry(&format!("pkg-{i}"))).collect();
    mount_search_term(&server, "pkg", entries).await;

    let (engine, cache) = engine_for(&server);
    let results = engine.run(&search_request(&["pkg"]).with_limit(3)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name, "pkg-0");

    // The un-emitted tail is not discarded
    let cached = cache
        .get(&CacheKey::search("pkg", SearchField::Name))
        .unwrap();
    assert_eq!(cached.len(), 10);
}

#[tokio::test]
async fn replay_honors_the_limit_in_effect_at_replay_time() {
    let server = MockServer::start().await;
    let entries: Vec<_> = (0..10).map(|i| entry(&format!("pkg-{i}"))).collect();
    mount_search_term(&server, "pkg", entries).await;

    let (engine, _cache) = engine_for(&server);

    let unbounded = engine.run(&search_request(&["pkg"])).await;
    assert_eq!(unbounded.len(), 10);

    // Second run is a replay (expect(1) guards that) with a tighter cap
    let capped = engine.run(&search_request(&["pkg"]).with_limit(2)).await;
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[0].name, "pkg-0");
}

#[tokio::test]
async fn failing_term_does_not_affect_siblings() {
    let server = MockServer::start().await;
    mount_search_term(&server, "good", vec![entry("good-one")]).await;
    Mock::given(method("GET"))
        .and(query_param("arg", "broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let (engine, cache) = engine_for(&server);
    let results = engine.run(&search_request(&["good", "broken"])).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "good-one");

    // A failed fetch never populates the cache
    assert!(!cache.contains_fresh(&CacheKey::search("broken", SearchField::Name)));
}

#[tokio::test]
async fn error_envelope_contributes_zero_results() {
    let server = MockServer::start().await;
    mount_search_term(&server, "good", vec![entry("good-one")]).await;
    Mock::given(method("GET"))
        .and(query_param("arg", "e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 5,
            "type": "error",
            "resultcount": 0,
            "results": [],
            "error": "Too many package results."
        })))
        .mount(&server)
        .await;

    let (engine, _cache) = engine_for(&server);
    let results = engine.run(&search_request(&["good", "e"])).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "good-one");
}

#[tokio::test]
async fn undecodable_entry_is_skipped_within_a_response() {
    let server = MockServer::start().await;
    mount_search_term(
        &server,
        "mixed",
        vec![
            entry("good-one"),
            json!({"Name": "bad", "NumVotes": "not-a-number"}),
            entry("good-two"),
        ],
    )
    .await;

    let (engine, cache) = engine_for(&server);
    let results = engine.run(&search_request(&["mixed"])).await;

    let names: Vec<_> = results.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["good-one", "good-two"]);

    // The skipped entry is also absent from the cached set
    let cached = cache
        .get(&CacheKey::search("mixed", SearchField::Name))
        .unwrap();
    assert_eq!(cached.len(), 2);
}

#[tokio::test]
async fn collector_terminates_with_no_terms() {
    let server = MockServer::start().await;
    let (engine, _cache) = engine_for(&server);

    let results = engine.run(&search_request(&[])).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn info_mode_looks_up_each_name() {
    let server = MockServer::start().await;
    for name in ["yay", "paru"] {
        Mock::given(method("GET"))
            .and(query_param("type", "info"))
            .and(query_param("arg[]", name))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": 5,
                "type": "multiinfo",
                "resultcount": 1,
                "results": [entry(name)]
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (engine, cache) = engine_for(&server);
    let request = SearchRequest::info(vec!["yay".to_string(), "paru".to_string()]);
    let results = engine.run(&request).await;

    assert_eq!(results.len(), 2);
    assert!(cache.contains_fresh(&CacheKey::info("yay")));
    assert!(cache.contains_fresh(&CacheKey::info("paru")));
}

#[tokio::test]
async fn verbose_stamps_url_and_sequence() {
    let server = MockServer::start().await;
    mount_search_term(&server, "foo", vec![entry("foo-one"), entry("foo-two")]).await;

    let client = Arc::new(RpcClient::with_base_url(server.uri()).unwrap());
    let cache = Arc::new(SearchCache::new());
    let engine = SearchEngine::new(client, Arc::clone(&cache)).with_verbose(true);

    let results = engine.run(&search_request(&["foo"])).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].sequence, Some(1));
    assert_eq!(results[1].sequence, Some(2));
    assert!(results[0].request_url.as_ref().unwrap().contains("arg=foo"));

    // Replayed packages get the same stamps
    let replayed = engine.run(&search_request(&["foo"])).await;
    assert_eq!(replayed[1].sequence, Some(2));
    assert!(replayed[0].request_url.as_ref().unwrap().contains("arg=foo"));
}

#[tokio::test]
async fn non_verbose_packages_carry_no_stamps() {
    let server = MockServer::start().await;
    mount_search_term(&server, "foo", vec![entry("foo-one")]).await;

    let (engine, _cache) = engine_for(&server);
    let results = engine.run(&search_request(&["foo"])).await;

    assert!(results[0].request_url.is_none());
    assert!(results[0].sequence.is_none());
}
