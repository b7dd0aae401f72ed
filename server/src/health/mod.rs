//! ヘルスリコンサイル
//!
//! 登録済みマイクロフロントエンドのライブネスと依存バックエンドの健全性を
//! 定期的に再確認し、応答しなくなったエントリを削除する。

pub mod reconciler;

pub use reconciler::{probe_client, BackendHealthOutcome, CycleReport, HealthReconciler};
