//! 登録サービス
//!
//! 登録・登録解除リクエストを検証し、ストアに反映する。

use crate::directory::DirectoryClient;
use crate::registry::store::RegistryStore;
use mf_registry_common::{
    error::{RegistryError, RegistryResult},
    protocol::RegisterRequest,
    types::{find_backend, MicrofrontendEntry},
};
use tracing::info;

/// 登録サービス
#[derive(Clone)]
pub struct RegistrationService {
    store: RegistryStore,
    directory: DirectoryClient,
}

impl RegistrationService {
    /// 新しい登録サービスを作成
    pub fn new(store: RegistryStore, directory: DirectoryClient) -> Self {
        Self { store, directory }
    }

    /// 背後のストア
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// マイクロフロントエンドを登録
    pub async fn register(&self, req: RegisterRequest) -> RegistryResult<MicrofrontendEntry> {
        let new = req.validate()?;

        if self.store.find_by_url(&new.url).await.is_some() {
            return Err(RegistryError::AlreadyRegistered(new.url));
        }
        if self.store.find_by_name(&new.name).await.is_some() {
            return Err(RegistryError::AlreadyRegistered(new.name));
        }

        let services = self.directory.fetch_backend_services().await?;
        let backend = find_backend(&services, &new.backend_name)
            .ok_or_else(|| RegistryError::UnknownBackend(new.backend_name.clone()))?;

        let entry = new.into_entry(backend);
        // ディレクトリ待ちの間にストアが変わっている可能性があるため、
        // insert側で一意性を再検証する
        self.store.insert(entry.clone()).await?;

        info!(
            name = %entry.name,
            url = %entry.url,
            backend = %entry.backend_name,
            is_active = entry.is_active,
            "Microfrontend registered"
        );

        Ok(entry)
    }

    /// マイクロフロントエンドを登録解除
    ///
    /// 空の名前は`?name`の指定漏れとして扱い、`NotFound`ではなく
    /// 検証エラーを返す。
    pub async fn deregister(&self, name: &str) -> RegistryResult<MicrofrontendEntry> {
        if name.is_empty() {
            return Err(RegistryError::missing_field("name"));
        }

        let removed = self
            .store
            .remove_by_name(name)
            .await
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        info!(name = %removed.name, url = %removed.url, "Microfrontend deregistered");

        Ok(removed)
    }

    /// 登録済み一覧（登録順、フィルタなし）
    pub async fn list(&self) -> Vec<MicrofrontendEntry> {
        self.store.all().await
    }
}
