//! バックエンドサービスディレクトリクライアント
//!
//! 外部ディレクトリから既知のバックエンドサービスとその状態を取得する。
//! キャッシュもリトライも行わず、呼び出しごとに新しいリクエストを発行する。

use mf_registry_common::{
    error::{RegistryError, RegistryResult},
    protocol::BackendServicesResponse,
    types::BackendServiceStatus,
};
use reqwest::Client;
use tracing::debug;

/// ディレクトリクライアント
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    url: String,
}

impl DirectoryClient {
    /// 新しいクライアントを作成
    ///
    /// タイムアウトは設定しない（必要なら外側で課す）。
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// 既存のHTTPクライアントを使って作成
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// ディレクトリのURL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// バックエンドサービス一覧を取得
    ///
    /// ネットワークエラー、タイムアウト、想定外のレスポンス形式はすべて
    /// `DirectoryUnavailable`になる。
    pub async fn fetch_backend_services(&self) -> RegistryResult<Vec<BackendServiceStatus>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(unavailable)?;

        let body: BackendServicesResponse = response.json().await.map_err(unavailable)?;

        debug!(
            url = %self.url,
            count = body.services.len(),
            "Fetched backend services"
        );

        Ok(body.services)
    }
}

fn unavailable(err: reqwest::Error) -> RegistryError {
    RegistryError::DirectoryUnavailable(format!("Failed to get backend services: {err}"))
}
