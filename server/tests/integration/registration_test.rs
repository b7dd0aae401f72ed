//! Integration Test: マイクロフロントエンド登録
//!
//! シェルアプリがマイクロフロントエンド起動時に登録し、一覧に反映されることを確認

use reqwest::Client;
use serde_json::{json, Value};

use crate::support::directory::MockDirectory;
use crate::support::http::spawn_registry;

fn register_body(name: &str, url: &str, backend: &str) -> Value {
    json!({
        "name": name,
        "url": url,
        "component": name.to_uppercase(),
        "backendName": backend
    })
}

#[tokio::test]
async fn test_registration_appears_in_list_with_activity() {
    let directory = MockDirectory::start(&[("svc1", 200), ("svc2", 500)]).await;
    let registry = spawn_registry(directory.url()).await;
    let client = Client::new();

    for (name, url, backend) in [("a", "http://a", "svc1"), ("b", "http://b", "svc2")] {
        let response = client
            .post(registry.url("/microfrontends"))
            .json(&register_body(name, url, backend))
            .send()
            .await
            .expect("registration request failed");
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"success": true}));
    }

    let list: Value = client
        .get(registry.url("/microfrontends"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        list,
        json!([
            {"name": "a", "url": "http://a", "component": "A", "backendName": "svc1", "isActive": true},
            {"name": "b", "url": "http://b", "component": "B", "backendName": "svc2", "isActive": false}
        ])
    );

    registry.stop().await;
}

#[tokio::test]
async fn test_duplicate_url_is_rejected() {
    let directory = MockDirectory::start(&[("svc1", 200)]).await;
    let registry = spawn_registry(directory.url()).await;
    let client = Client::new();

    let first = client
        .post(registry.url("/microfrontends"))
        .json(&register_body("a", "http://a", "svc1"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 200);

    let second = client
        .post(registry.url("/microfrontends"))
        .json(&register_body("a2", "http://a", "svc1"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 400);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["type"], "already_connected");

    assert_eq!(registry.store.len().await, 1);
    registry.stop().await;
}

#[tokio::test]
async fn test_unknown_backend_is_rejected() {
    let directory = MockDirectory::start(&[("svc1", 200)]).await;
    let registry = spawn_registry(directory.url()).await;

    let response = Client::new()
        .post(registry.url("/microfrontends"))
        .json(&register_body("a", "http://a", "billing"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["type"], "unknown_backend");
    assert!(registry.store.is_empty().await);
    registry.stop().await;
}

#[tokio::test]
async fn test_directory_failure_is_server_error_without_details() {
    let directory = MockDirectory::start(&[]).await;
    directory.fail().await;
    let registry = spawn_registry(directory.url()).await;

    let response = Client::new()
        .post(registry.url("/microfrontends"))
        .json(&register_body("a", "http://a", "svc1"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"type": "server_error"}));
    registry.stop().await;
}

#[tokio::test]
async fn test_legacy_content_component_field() {
    let directory = MockDirectory::start(&[("svc1", 200)]).await;
    let registry = spawn_registry(directory.url()).await;
    let client = Client::new();

    let response = client
        .post(registry.url("/microfrontends"))
        .json(&json!({
            "name": "a",
            "url": "http://a",
            "contentComponent": "LegacyA",
            "backendName": "svc1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let list: Value = client
        .get(registry.url("/microfrontends"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list[0]["component"], "LegacyA");
    registry.stop().await;
}
