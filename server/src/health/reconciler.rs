//! ヘルスリコンサイラ
//!
//! 一定間隔で登録済みマイクロフロントエンドの到達性と
//! 依存バックエンドの健全性を再確認する。
//!
//! 1サイクルは2段階:
//!
//! - ライブネス: サイクル開始時のスナップショットに対して`GET <url>`を発行し、
//!   応答しなかったエントリを識別子で削除する
//! - バックエンド: 残ったエントリがあればディレクトリを1回だけ取得し、
//!   各エントリの`is_active`を再計算する（取得失敗時はログのみで何も変えない）

use crate::directory::DirectoryClient;
use crate::registry::{ActivitySummary, EntryId, RegistryStore, TrackedEntry};
use crate::shutdown::ShutdownController;
use futures::future::join_all;
use reqwest::Client;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// デフォルトのリコンサイル間隔（ミリ秒）
const DEFAULT_INTERVAL_MS: u64 = 10_000;

/// ライブネスプローブのデフォルトタイムアウト（秒）
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// バックエンド健全性パスの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealthOutcome {
    /// ライブネスパス後にエントリが残らなかったため省略
    SkippedEmpty,
    /// ディレクトリ取得に失敗したため省略（`is_active`は据え置き）
    DirectoryUnavailable(String),
    /// `is_active`を再計算した
    Updated(ActivitySummary),
}

/// 1サイクルの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// プローブしたエントリ数
    pub probed: usize,
    /// 削除したエントリのURL
    pub evicted: Vec<String>,
    /// バックエンド健全性パスの結果
    pub backend_health: BackendHealthOutcome,
}

impl CycleReport {
    /// サイクル結果をinfoレベルで出力
    pub fn log(&self) {
        match &self.backend_health {
            BackendHealthOutcome::Updated(summary) => info!(
                probed = self.probed,
                evicted = self.evicted.len(),
                active = summary.active,
                inactive = summary.inactive,
                "Reconciliation cycle completed"
            ),
            BackendHealthOutcome::SkippedEmpty => info!(
                probed = self.probed,
                evicted = self.evicted.len(),
                backend_health = "skipped",
                "Reconciliation cycle completed"
            ),
            BackendHealthOutcome::DirectoryUnavailable(reason) => info!(
                probed = self.probed,
                evicted = self.evicted.len(),
                backend_health = "directory_unavailable",
                reason = %reason,
                "Reconciliation cycle completed"
            ),
        }
    }
}

/// ライブネスプローブ用のHTTPクライアントを作成
pub fn probe_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// ヘルスリコンサイラ
#[derive(Clone)]
pub struct HealthReconciler {
    store: RegistryStore,
    directory: DirectoryClient,
    probe_client: Client,
    interval: Duration,
    in_progress: Arc<AtomicBool>,
}

impl HealthReconciler {
    /// 新しいリコンサイラを作成
    pub fn new(store: RegistryStore, directory: DirectoryClient) -> Self {
        let timeout = Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS);
        let probe_client = probe_client(timeout).unwrap_or_else(|e| {
            warn!(
                error = %e,
                timeout_ms = timeout.as_millis() as u64,
                "Failed to build probe client, probes will run without a timeout"
            );
            Client::default()
        });

        Self {
            store,
            directory,
            probe_client,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    /// リコンサイル間隔を設定
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// プローブ用HTTPクライアントを差し替える（タイムアウト設定など）
    pub fn with_probe_client(mut self, client: Client) -> Self {
        self.probe_client = client;
        self
    }

    /// バックグラウンドで監視を開始
    ///
    /// 前のサイクルが完了してから次の間隔を計り始めるため、
    /// サイクルが重なることはない。シャットダウン要求は
    /// 待機中であれば即座に、サイクル実行中であれば完了後に反映される。
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_ms = self.interval.as_millis() as u64,
                "Health reconciler started"
            );

            loop {
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = shutdown.wait() => break,
                }

                self.run_cycle().await;
            }

            info!("Health reconciler stopped");
        })
    }

    /// 1サイクルを実行
    ///
    /// 別のサイクルが実行中なら何もせず`None`を返す。
    pub async fn run_cycle(&self) -> Option<CycleReport> {
        let Some(_guard) = CycleGuard::acquire(&self.in_progress) else {
            debug!("Reconciliation cycle already in progress, skipping");
            return None;
        };

        let snapshot = self.store.snapshot().await;
        let probed = snapshot.len();
        let evicted = self.liveness_pass(snapshot).await;
        let backend_health = self.backend_health_pass().await;

        let report = CycleReport {
            probed,
            evicted,
            backend_health,
        };

        report.log();
        Some(report)
    }

    async fn liveness_pass(&self, snapshot: Vec<TrackedEntry>) -> Vec<String> {
        let probes = snapshot.into_iter().map(|tracked| async move {
            let alive = self.probe(&tracked).await;
            (tracked, alive)
        });

        let dead: Vec<TrackedEntry> = join_all(probes)
            .await
            .into_iter()
            .filter_map(|(tracked, alive)| (!alive).then_some(tracked))
            .collect();

        let ids: Vec<EntryId> = dead.iter().map(|tracked| tracked.id).collect();
        self.store
            .remove_by_ids(&ids)
            .await
            .into_iter()
            .map(|entry| entry.url)
            .collect()
    }

    /// `GET <url>`を発行し、何らかのHTTP応答があれば生存とみなす
    async fn probe(&self, tracked: &TrackedEntry) -> bool {
        match self.probe_client.get(&tracked.entry.url).send().await {
            Ok(response) => {
                debug!(
                    name = %tracked.entry.name,
                    url = %tracked.entry.url,
                    status = response.status().as_u16(),
                    "Microfrontend responded"
                );
                true
            }
            Err(e) => {
                info!(
                    name = %tracked.entry.name,
                    url = %tracked.entry.url,
                    error = %e,
                    "Microfrontend not responding, evicting"
                );
                false
            }
        }
    }

    async fn backend_health_pass(&self) -> BackendHealthOutcome {
        if self.store.is_empty().await {
            return BackendHealthOutcome::SkippedEmpty;
        }

        match self.directory.fetch_backend_services().await {
            Ok(services) => {
                BackendHealthOutcome::Updated(self.store.apply_backend_health(&services).await)
            }
            Err(e) => {
                warn!(error = %e, "Failed to check microfrontends activity");
                BackendHealthOutcome::DirectoryUnavailable(e.to_string())
            }
        }
    }
}

struct CycleGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> CycleGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
