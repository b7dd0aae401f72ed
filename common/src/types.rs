//! 共通型定義
//!
//! MicrofrontendEntry, BackendServiceStatus等のコアデータ型

use serde::{Deserialize, Serialize};

/// ディレクトリ上で「健全」とみなすステータスコード
pub const HEALTHY_STATUS_CODE: u16 = 200;

/// 登録済みマイクロフロントエンド
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MicrofrontendEntry {
    /// 名前（登録解除時のキー）
    pub name: String,
    /// URL（重複判定キー兼ライブネスプローブ先）
    pub url: String,
    /// UIエントリポイントへの参照（そのまま透過する）
    pub component: String,
    /// 依存するバックエンドサービス名
    pub backend_name: String,
    /// バックエンドサービスが直近で健全だったか
    pub is_active: bool,
}

impl MicrofrontendEntry {
    /// 取得済みのバックエンドサービス一覧から`is_active`を再計算する
    ///
    /// ディレクトリに存在しないバックエンドは非アクティブとして扱う。
    pub fn refresh_activity(&mut self, services: &[BackendServiceStatus]) -> bool {
        self.is_active = find_backend(services, &self.backend_name)
            .map(BackendServiceStatus::is_healthy)
            .unwrap_or(false);
        self.is_active
    }
}

/// ディレクトリから取得したバックエンドサービスの状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendServiceStatus {
    /// サービス名
    pub name: String,
    /// 観測されたHTTPステータスコード
    #[serde(rename = "status-code")]
    pub status_code: u16,
}

impl BackendServiceStatus {
    /// Returns true when the directory last observed this service as healthy.
    pub fn is_healthy(&self) -> bool {
        self.status_code == HEALTHY_STATUS_CODE
    }
}

/// 名前の完全一致でバックエンドサービスを検索
pub fn find_backend<'a>(
    services: &'a [BackendServiceStatus],
    name: &str,
) -> Option<&'a BackendServiceStatus> {
    services.iter().find(|service| service.name == name)
}
