//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `RegistryError`は`error_type()`と`external_message()`を提供し、
//! リクエスト境界で一度だけHTTPレスポンスに変換される。

use thiserror::Error;

/// レジストリのエラー型
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Malformed or missing request field
    #[error("Validation error on `{field}`: {message}")]
    Validation {
        /// 失敗したフィールド名
        field: String,
        /// 詳細
        message: String,
    },

    /// A microfrontend with the same url (or name) is already registered
    #[error("Microfrontend already registered: {0}")]
    AlreadyRegistered(String),

    /// Backend name not present in the directory snapshot
    #[error("Unknown backend service: {0}")]
    UnknownBackend(String),

    /// Deregistration target not registered
    #[error("Microfrontend not found: {0}")]
    NotFound(String),

    /// Directory fetch or parse failure
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// 必須フィールド欠落のバリデーションエラーを作成
    pub fn missing_field(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: format!("\"{field}\" is required"),
        }
    }

    /// 任意メッセージ付きのバリデーションエラーを作成
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Returns the wire-level error type string.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::AlreadyRegistered(_) => "already_connected",
            Self::UnknownBackend(_) => "unknown_backend",
            Self::NotFound(_) => "not_found",
            Self::DirectoryUnavailable(_) => "server_error",
            Self::Internal(_) => "server_error",
        }
    }

    /// Returns a message that is safe to show to external clients.
    ///
    /// Server-side failures return `None`: their details (directory URL,
    /// transport errors) belong in the server log only.
    pub fn external_message(&self) -> Option<String> {
        match self {
            Self::Validation { message, .. } => Some(message.clone()),
            Self::AlreadyRegistered(key) => Some(format!("{key} is already registered")),
            Self::UnknownBackend(name) => Some(format!("backend service {name} is unknown")),
            Self::NotFound(name) => Some(format!("microfrontend {name} is not registered")),
            Self::DirectoryUnavailable(_) | Self::Internal(_) => None,
        }
    }

    /// クライアント起因のエラーか（400相当）
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::DirectoryUnavailable(_) | Self::Internal(_))
    }
}

/// Result型エイリアス
pub type RegistryResult<T> = Result<T, RegistryError>;
