//! 通信プロトコル定義
//!
//! シェルアプリ↔レジストリ間、レジストリ↔ディレクトリ間のメッセージ

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::types::{BackendServiceStatus, MicrofrontendEntry};

/// マイクロフロントエンド登録リクエスト
///
/// 欠落と空文字を区別せずに検証するため、全フィールドを`Option`で受ける。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// 名前
    #[serde(default)]
    pub name: Option<String>,
    /// URL
    #[serde(default)]
    pub url: Option<String>,
    /// UIエントリポイント（旧スキーマの`contentComponent`も受け付ける）
    #[serde(default, alias = "contentComponent")]
    pub component: Option<String>,
    /// 依存バックエンドサービス名
    #[serde(default)]
    pub backend_name: Option<String>,
}

impl RegisterRequest {
    /// 全フィールドが揃ったリクエストを作成
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        component: impl Into<String>,
        backend_name: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
            component: Some(component.into()),
            backend_name: Some(backend_name.into()),
        }
    }

    /// 必須フィールドを検証し、登録可能な形に変換する
    pub fn validate(self) -> RegistryResult<NewMicrofrontend> {
        Ok(NewMicrofrontend {
            name: required("name", self.name)?,
            url: required("url", self.url)?,
            component: required("component", self.component)?,
            backend_name: required("backendName", self.backend_name)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> RegistryResult<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(RegistryError::invalid(
            field,
            format!("\"{field}\" is not allowed to be empty"),
        )),
        None => Err(RegistryError::missing_field(field)),
    }
}

/// 検証済みの登録内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMicrofrontend {
    /// 名前
    pub name: String,
    /// URL
    pub url: String,
    /// UIエントリポイント
    pub component: String,
    /// 依存バックエンドサービス名
    pub backend_name: String,
}

impl NewMicrofrontend {
    /// バックエンドの状態を付与してエントリを作成
    pub fn into_entry(self, backend: &BackendServiceStatus) -> MicrofrontendEntry {
        MicrofrontendEntry {
            name: self.name,
            url: self.url,
            component: self.component,
            backend_name: backend.name.clone(),
            is_active: backend.is_healthy(),
        }
    }
}

/// 登録解除クエリ（`?name=`）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloseQuery {
    /// 登録解除するマイクロフロントエンド名
    #[serde(default)]
    pub name: Option<String>,
}

/// 成功レスポンス（`{"success": true}`）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    /// 常にtrue
    pub success: bool,
}

impl SuccessResponse {
    /// 成功レスポンスを作成
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// エラーレスポンス本文
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// エラー種別
    #[serde(rename = "type")]
    pub error_type: String,
    /// 外部向けメッセージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&RegistryError> for ErrorResponse {
    fn from(err: &RegistryError) -> Self {
        Self {
            error_type: err.error_type().to_string(),
            message: err.external_message(),
        }
    }
}

/// ディレクトリ（`GET <directory-url>`）のレスポンス
///
/// 未知のフィールドは無視する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendServicesResponse {
    /// バックエンドサービス一覧
    pub services: Vec<BackendServiceStatus>,
}
