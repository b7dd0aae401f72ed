//! マイクロフロントエンド登録管理
//!
//! 登録エントリをメモリ内で管理するストアと、
//! 登録・登録解除を検証して反映するサービス

pub mod service;
pub mod store;

pub use service::RegistrationService;
pub use store::{ActivitySummary, EntryId, RegistryStore, TrackedEntry};
