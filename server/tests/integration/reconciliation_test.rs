//! Integration Test: ヘルスリコンサイル
//!
//! 応答しなくなったマイクロフロントエンドが一覧から消え、
//! 残ったエントリの`isActive`が最新のディレクトリ状態に追従することを確認

use mf_registry::health::BackendHealthOutcome;
use reqwest::Client;
use serde_json::{json, Value};

use crate::support::directory::MockDirectory;
use crate::support::microfrontend::spawn_microfrontend;
use crate::support::http::{spawn_registry, TestRegistry};

async fn register(registry: &TestRegistry, name: &str, url: &str, backend: &str) {
    let response = Client::new()
        .post(registry.url("/microfrontends"))
        .json(&json!({
            "name": name,
            "url": url,
            "component": name.to_uppercase(),
            "backendName": backend
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200, "registration of {name} failed");
}

async fn list(registry: &TestRegistry) -> Value {
    Client::new()
        .get(registry.url("/microfrontends"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_unresponsive_microfrontend_is_evicted() {
    let directory = MockDirectory::start(&[("svc1", 200)]).await;
    let registry = spawn_registry(directory.url()).await;
    let microfrontend = spawn_microfrontend().await;
    let url = microfrontend.uri();

    register(&registry, "a", &url, "svc1").await;
    assert_eq!(list(&registry).await[0]["isActive"], true);

    // 同じURLの2件目は拒否される
    let duplicate = Client::new()
        .post(registry.url("/microfrontends"))
        .json(&json!({"name": "a2", "url": url, "component": "A", "backendName": "svc1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 400);

    // マイクロフロントエンドが落ちる
    microfrontend.kill().await;

    let report = registry.reconciler.run_cycle().await.unwrap();
    assert_eq!(report.evicted, vec![url]);
    assert_eq!(report.backend_health, BackendHealthOutcome::SkippedEmpty);
    assert_eq!(list(&registry).await, json!([]));

    registry.stop().await;
}

#[tokio::test]
async fn test_backend_status_changes_are_reflected() {
    let directory = MockDirectory::start(&[("svc1", 200), ("svc2", 200)]).await;
    let registry = spawn_registry(directory.url()).await;
    let one = spawn_microfrontend().await;
    let two = spawn_microfrontend().await;

    register(&registry, "one", &one.uri(), "svc1").await;
    register(&registry, "two", &two.uri(), "svc2").await;

    // svc1が不調になり、svc2はディレクトリから消える
    directory.respond_with(&[("svc1", 503)]).await;
    registry.reconciler.run_cycle().await.unwrap();

    let entries = list(&registry).await;
    assert_eq!(entries.as_array().unwrap().len(), 2);
    assert_eq!(entries[0]["isActive"], false);
    assert_eq!(entries[1]["isActive"], false);

    // svc1が回復
    directory.respond_with(&[("svc1", 200)]).await;
    registry.reconciler.run_cycle().await.unwrap();

    let entries = list(&registry).await;
    assert_eq!(entries[0]["isActive"], true);
    assert_eq!(entries[1]["isActive"], false);

    registry.stop().await;
}

#[tokio::test]
async fn test_directory_outage_keeps_entries_and_activity() {
    let directory = MockDirectory::start(&[("svc1", 200), ("svc2", 404)]).await;
    let registry = spawn_registry(directory.url()).await;
    let one = spawn_microfrontend().await;
    let two = spawn_microfrontend().await;

    register(&registry, "one", &one.uri(), "svc1").await;
    register(&registry, "two", &two.uri(), "svc2").await;
    let before = list(&registry).await;

    directory.fail().await;
    let report = registry.reconciler.run_cycle().await.unwrap();

    assert!(report.evicted.is_empty());
    assert!(matches!(
        report.backend_health,
        BackendHealthOutcome::DirectoryUnavailable(_)
    ));
    assert_eq!(list(&registry).await, before);

    registry.stop().await;
}

#[tokio::test]
async fn test_only_failed_probes_are_evicted() {
    let directory = MockDirectory::start(&[("svc1", 200)]).await;
    let registry = spawn_registry(directory.url()).await;
    let mut servers = Vec::new();
    for name in ["a", "b", "c", "d"] {
        let server = spawn_microfrontend().await;
        register(&registry, name, &server.uri(), "svc1").await;
        servers.push(server);
    }

    // a と b（隣接）と d を落とす
    let d = servers.pop().unwrap();
    let c = servers.pop().unwrap();
    d.kill().await;
    for server in servers {
        server.kill().await;
    }

    let report = registry.reconciler.run_cycle().await.unwrap();
    assert_eq!(report.probed, 4);
    assert_eq!(report.evicted.len(), 3);

    let entries = list(&registry).await;
    assert_eq!(
        entries,
        json!([{
            "name": "c",
            "url": c.uri(),
            "component": "C",
            "backendName": "svc1",
            "isActive": true
        }])
    );

    registry.stop().await;
}
