//! Content store + sync gateway behavior against a mock durable store:
//! partial-failure isolation on pull, cache fallback on load, atomic
//! commit with buffer retention on failure.

mod common;

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use funnel_client::{
    ApiClient, ContentStore, ContentSyncGateway, LocalCache, Section, SiteContent,
};

use common::{spawn, test_policy, unreachable_base_url};

fn store_against(base_url: &str, cache_dir: &std::path::Path) -> ContentStore {
    let api = ApiClient::new(base_url, test_policy()).expect("build client");
    ContentStore::new(ContentSyncGateway::new(api), LocalCache::new(cache_dir))
}

#[tokio::test]
async fn pull_isolates_a_corrupt_section() {
    let mut doc = serde_json::to_value(SiteContent::default()).unwrap();
    doc["features"] = json!("garbage, not a list");
    doc["hero"]["title"] = json!("From the server");

    let router = Router::new().route(
        "/content",
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    );
    let base_url = spawn(router).await;

    let api = ApiClient::new(&base_url, test_policy()).unwrap();
    let content = ContentSyncGateway::new(api).pull().await.unwrap();

    let defaults = SiteContent::default();
    assert_eq!(content.features, defaults.features);
    assert_eq!(content.hero.title, "From the server");
    assert_eq!(content.seo, defaults.seo);
}

#[tokio::test]
async fn load_serves_cached_copy_when_store_errors() {
    let router = Router::new().route(
        "/content",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "boom" })),
            )
        }),
    );
    let base_url = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("content.json"), r#"{"hero":{"title":"X"}}"#).unwrap();

    let store = store_against(&base_url, dir.path());
    let content = store.load().await;

    assert_eq!(content.hero.title, "X");
    // Everything the cache did not carry is the default document.
    assert_eq!(content.seo, SiteContent::default().seo);
    assert_eq!(content.colors, SiteContent::default().colors);
}

#[tokio::test]
async fn load_serves_defaults_when_store_and_cache_are_cold() {
    let base_url = unreachable_base_url().await;
    let dir = tempfile::tempdir().unwrap();

    let store = store_against(&base_url, dir.path());
    let content = store.load().await;

    assert_eq!(*content, SiteContent::default());
}

#[tokio::test]
async fn successful_load_refreshes_the_cache() {
    let mut doc = serde_json::to_value(SiteContent::default()).unwrap();
    doc["hero"]["title"] = json!("Fresh from the server");

    let router = Router::new().route(
        "/content",
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    );
    let base_url = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_against(&base_url, dir.path());
    let loaded = store.load().await;

    let cached = LocalCache::new(dir.path()).load_content().unwrap();
    assert_eq!(cached, *loaded);
    assert_eq!(cached.hero.title, "Fresh from the server");
}

#[tokio::test]
async fn commit_upserts_every_section_and_swaps_current() {
    let sections: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = sections.clone();
    let router = Router::new().route(
        "/content",
        post(move |Json(body): Json<Value>| {
            let seen = seen.clone();
            async move {
                let section = body["section"].as_str().unwrap_or("?").to_string();
                seen.lock().unwrap().push(section);
                Json(json!({ "success": true }))
            }
        }),
    );
    let base_url = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_against(&base_url, dir.path());

    let mut buffer = store.begin_edit();
    buffer
        .set_field(Section::Hero, "title", json!("Edited headline"))
        .unwrap();
    let committed = store.commit(buffer).await.unwrap();

    assert_eq!(committed.hero.title, "Edited headline");
    assert_eq!(store.current().hero.title, "Edited headline");

    let pushed = sections.lock().unwrap().clone();
    assert_eq!(pushed.len(), Section::ALL.len());
    for section in Section::ALL {
        assert!(pushed.contains(&section.as_str().to_string()), "{section} missing");
    }

    // Cache was replaced alongside the current document.
    let cached = LocalCache::new(dir.path()).load_content().unwrap();
    assert_eq!(cached.hero.title, "Edited headline");
}

#[tokio::test]
async fn failed_commit_keeps_buffer_current_and_cache_untouched() {
    let router = Router::new().route(
        "/content",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "disk full" })),
            )
        }),
    );
    let base_url = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_against(&base_url, dir.path());

    let mut buffer = store.begin_edit();
    buffer
        .set_field(Section::Hero, "title", json!("Never lands"))
        .unwrap();

    let err = store.commit(buffer).await.unwrap_err();
    assert!(err.error.is_retryable());
    // The buffer comes back intact for retry.
    assert_eq!(
        err.buffer.field(Section::Hero, "title"),
        Some(&json!("Never lands"))
    );
    // Current document and cache never saw the edit.
    assert_eq!(store.current().hero.title, SiteContent::default().hero.title);
    assert!(LocalCache::new(dir.path()).load_content().is_none());
}

#[tokio::test]
async fn readers_never_observe_a_half_committed_document() {
    let router = Router::new().route(
        "/content",
        post(|| async { Json(json!({ "success": true })) }),
    );
    let base_url = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_against(&base_url, dir.path()));

    let mut buffer = store.begin_edit();
    buffer.set_field(Section::Hero, "title", json!("v2")).unwrap();
    buffer.set_field(Section::Seo, "title", json!("v2")).unwrap();

    let reader = {
        let store = store.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                let doc = store.current();
                // Both edits land together or not at all.
                assert_eq!(doc.hero.title == "v2", doc.seo.title == "v2");
                tokio::task::yield_now().await;
            }
        })
    };

    store.commit(buffer).await.unwrap();
    reader.await.unwrap();

    assert_eq!(store.current().hero.title, "v2");
    assert_eq!(store.current().seo.title, "v2");
}
