//! 設定管理
//!
//! RegistryConfig等の設定構造体

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 設定エラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須項目が未設定
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    /// 値が不正
    #[error("Invalid configuration for {key}: {reason}")]
    Invalid {
        /// 設定キー
        key: &'static str,
        /// 理由
        reason: String,
    },
}

/// レジストリサーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// バックエンドサービス一覧を返すディレクトリのURL（必須）
    #[serde(default)]
    pub directory_url: String,

    /// リコンサイル間隔（ミリ秒）(デフォルト: 10000)
    #[serde(default = "default_reconcile_interval_ms")]
    pub reconcile_interval_ms: u64,

    /// ライブネスプローブのタイムアウト（ミリ秒）(デフォルト: 5000)
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// ログ出力ディレクトリ (デフォルト: "logs")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_reconcile_interval_ms() -> u64 {
    10_000
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            directory_url: String::new(),
            reconcile_interval_ms: default_reconcile_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            log_dir: default_log_dir(),
        }
    }
}

impl RegistryConfig {
    /// 必須項目の存在を検証する
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory_url.trim().is_empty() {
            return Err(ConfigError::Missing("directory_url"));
        }
        if self.reconcile_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "reconcile_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "probe_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// リコンサイル間隔
    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_millis(self.reconcile_interval_ms)
    }

    /// プローブタイムアウト
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
