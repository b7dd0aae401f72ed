//! CLI module for mf-registry
//!
//! 起動引数は環境変数でも指定できる。

use clap::Parser;
use mf_registry_common::config::{ConfigError, RegistryConfig};
use std::path::PathBuf;

use crate::config::resolve_directory_url;

/// Microfrontend Registry - tracks running microfrontends and their backend health
#[derive(Parser, Debug, Clone)]
#[command(name = "mf-registry")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    MF_REGISTRY_HOST            Bind address (default: 0.0.0.0)
    PORT                        Listen port (default: 3000)
    GET_BACKEND_SERVICES_URL    Backend service directory URL (required)
    BACKEND_SERVICES_URL        Deprecated alias of GET_BACKEND_SERVICES_URL
    ACTIVITY_CHECK_DELAY_MS     Reconciliation interval in ms (default: 10000)
    PROBE_TIMEOUT_MS            Liveness probe timeout in ms (default: 5000)
    MF_REGISTRY_LOG_DIR         Directory for combined.log (default: logs)
    RUST_LOG                    Log filter (default: info)
"#)]
pub struct Cli {
    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "MF_REGISTRY_HOST")]
    pub host: String,

    /// Listen port
    #[arg(short, long, default_value = "3000", env = "PORT")]
    pub port: u16,

    /// Backend service directory URL
    #[arg(long, env = "GET_BACKEND_SERVICES_URL")]
    pub directory_url: Option<String>,

    /// Reconciliation interval (milliseconds)
    #[arg(long, default_value = "10000", env = "ACTIVITY_CHECK_DELAY_MS")]
    pub reconcile_interval_ms: u64,

    /// Liveness probe timeout (milliseconds)
    #[arg(long, default_value = "5000", env = "PROBE_TIMEOUT_MS")]
    pub probe_timeout_ms: u64,

    /// Log directory
    #[arg(long, default_value = "logs", env = "MF_REGISTRY_LOG_DIR")]
    pub log_dir: PathBuf,
}

impl Cli {
    /// 引数を検証済みの設定に変換
    pub fn into_config(self) -> Result<RegistryConfig, ConfigError> {
        let config = RegistryConfig {
            host: self.host,
            port: self.port,
            directory_url: resolve_directory_url(self.directory_url).unwrap_or_default(),
            reconcile_interval_ms: self.reconcile_interval_ms,
            probe_timeout_ms: self.probe_timeout_ms,
            log_dir: self.log_dir,
        };
        config.validate()?;
        Ok(config)
    }
}
