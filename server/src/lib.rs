//! Microfrontend Registry Server
//!
//! 稼働中のマイクロフロントエンドと依存バックエンドの健全性を管理するレジストリ

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// バックエンドサービスディレクトリクライアント
pub mod directory;

/// ヘルスリコンサイル
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// マイクロフロントエンド登録管理
pub mod registry;

/// axumサーバー起動・シャットダウン
pub mod server;

/// 協調シャットダウン
pub mod shutdown;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 登録サービス
    pub registry: registry::RegistrationService,
}
