//! マイクロフロントエンドストア
//!
//! 登録順を保持したエントリ一覧をメモリ内で管理する。
//! ロックはメソッド内で完結し、呼び出し側がガードを保持したまま
//! ネットワークI/Oを待つことはない。

use mf_registry_common::{
    error::{RegistryError, RegistryResult},
    types::{BackendServiceStatus, MicrofrontendEntry},
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// ストアが払い出すエントリの識別子
///
/// 同じURLで登録解除→再登録されたエントリを区別するために使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

#[derive(Debug, Clone)]
struct Slot {
    id: EntryId,
    entry: MicrofrontendEntry,
}

#[derive(Debug, Default)]
struct Inner {
    slots: Vec<Slot>,
    next_id: u64,
}

/// スナップショット上のエントリ（識別子付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntry {
    /// ストア内識別子
    pub id: EntryId,
    /// エントリ内容
    pub entry: MicrofrontendEntry,
}

/// `is_active`更新結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    /// アクティブになったエントリ数
    pub active: usize,
    /// 非アクティブになったエントリ数
    pub inactive: usize,
}

/// マイクロフロントエンドストア
#[derive(Clone, Default)]
pub struct RegistryStore {
    inner: Arc<RwLock<Inner>>,
}

impl RegistryStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// URLでエントリを検索
    pub async fn find_by_url(&self, url: &str) -> Option<MicrofrontendEntry> {
        let inner = self.inner.read().await;
        inner
            .slots
            .iter()
            .find(|slot| slot.entry.url == url)
            .map(|slot| slot.entry.clone())
    }

    /// 名前でエントリの位置を検索
    pub async fn find_by_name(&self, name: &str) -> Option<usize> {
        let inner = self.inner.read().await;
        position_by_name(&inner.slots, name)
    }

    /// エントリを末尾に追加
    ///
    /// 呼び出し側は事前に重複を確認するが、ディレクトリ問い合わせ中に
    /// 他のリクエストが割り込んでいる可能性があるため、書き込みロック下で
    /// URLと名前の一意性を再検証してから追加する。
    pub async fn insert(&self, entry: MicrofrontendEntry) -> RegistryResult<EntryId> {
        let mut inner = self.inner.write().await;

        if inner.slots.iter().any(|slot| slot.entry.url == entry.url) {
            return Err(RegistryError::AlreadyRegistered(entry.url));
        }
        if position_by_name(&inner.slots, &entry.name).is_some() {
            return Err(RegistryError::AlreadyRegistered(entry.name));
        }

        let id = EntryId(inner.next_id);
        inner.next_id += 1;
        inner.slots.push(Slot { id, entry });
        Ok(id)
    }

    /// 指定位置のエントリを削除（残りの順序は保持）
    pub async fn remove_at(&self, index: usize) -> Option<MicrofrontendEntry> {
        let mut inner = self.inner.write().await;
        if index < inner.slots.len() {
            Some(inner.slots.remove(index).entry)
        } else {
            None
        }
    }

    /// 名前でエントリを削除
    pub async fn remove_by_name(&self, name: &str) -> Option<MicrofrontendEntry> {
        let mut inner = self.inner.write().await;
        let index = position_by_name(&inner.slots, name)?;
        Some(inner.slots.remove(index).entry)
    }

    /// 識別子の一致するエントリをまとめて削除
    ///
    /// スナップショット取得後に削除・再登録されたエントリには影響しない。
    pub async fn remove_by_ids(&self, ids: &[EntryId]) -> Vec<MicrofrontendEntry> {
        if ids.is_empty() {
            return Vec::new();
        }

        let mut inner = self.inner.write().await;
        let mut removed = Vec::new();
        inner.slots.retain(|slot| {
            if ids.contains(&slot.id) {
                removed.push(slot.entry.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// 全エントリのスナップショット（登録順）
    pub async fn all(&self) -> Vec<MicrofrontendEntry> {
        let inner = self.inner.read().await;
        inner.slots.iter().map(|slot| slot.entry.clone()).collect()
    }

    /// 識別子付きスナップショット（リコンサイラ用）
    pub async fn snapshot(&self) -> Vec<TrackedEntry> {
        let inner = self.inner.read().await;
        inner
            .slots
            .iter()
            .map(|slot| TrackedEntry {
                id: slot.id,
                entry: slot.entry.clone(),
            })
            .collect()
    }

    /// 取得済みのバックエンド状態で全エントリの`is_active`を更新
    pub async fn apply_backend_health(
        &self,
        services: &[BackendServiceStatus],
    ) -> ActivitySummary {
        let mut inner = self.inner.write().await;
        let mut summary = ActivitySummary::default();
        for slot in inner.slots.iter_mut() {
            if slot.entry.refresh_activity(services) {
                summary.active += 1;
            } else {
                summary.inactive += 1;
            }
        }
        summary
    }

    /// 登録数
    pub async fn len(&self) -> usize {
        self.inner.read().await.slots.len()
    }

    /// 空かどうか
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.slots.is_empty()
    }
}

fn position_by_name(slots: &[Slot], name: &str) -> Option<usize> {
    slots.iter().position(|slot| slot.entry.name == name)
}
