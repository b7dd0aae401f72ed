use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// ディレクトリのパス
pub const SERVICES_PATH: &str = "/services";

/// バックエンドサービス一覧を返すモックディレクトリ
pub struct MockDirectory {
    pub server: MockServer,
}

#[allow(dead_code)]
impl MockDirectory {
    /// 指定した`[(name, status-code)]`を返すディレクトリを起動
    pub async fn start(services: &[(&str, u16)]) -> Self {
        let directory = Self {
            server: MockServer::start().await,
        };
        directory.respond_with(services).await;
        directory
    }

    /// ディレクトリのURL
    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), SERVICES_PATH)
    }

    /// 返すサービス一覧を差し替える
    pub async fn respond_with(&self, services: &[(&str, u16)]) {
        let services: Vec<Value> = services
            .iter()
            .map(|(name, code)| json!({"name": name, "status-code": code}))
            .collect();
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path(SERVICES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "services": services })))
            .mount(&self.server)
            .await;
    }

    /// ディレクトリを壊れた状態にする
    pub async fn fail(&self) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path(SERVICES_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&self.server)
            .await;
    }
}
