//! ロギング初期化
//!
//! 標準出力には人間向けの書式、`<log_dir>/combined.log`にはJSON形式で出力する。

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名
pub const LOG_FILE_NAME: &str = "combined.log";

/// デフォルトのログレベル
const DEFAULT_LOG_FILTER: &str = "info";

/// ロギング初期化エラー
#[derive(Debug, Error)]
pub enum LoggingError {
    /// ログディレクトリを作成できない
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        /// 対象ディレクトリ
        path: PathBuf,
        /// 原因
        source: std::io::Error,
    },

    /// グローバルsubscriberの設定に失敗
    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// ログファイルのパス
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// `RUST_LOG`が未設定ならinfoを使う
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// ロギングを初期化する
///
/// 戻り値のガードはプロセス終了まで保持すること（dropするとファイル出力が止まる）。
pub fn init(log_dir: &Path) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(file_writer),
        )
        .try_init()?;

    Ok(guard)
}
