//! マイクロフロントエンド登録APIハンドラー

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use mf_registry_common::{
    error::RegistryError,
    protocol::{CloseQuery, RegisterRequest, SuccessResponse},
    types::MicrofrontendEntry,
};

use super::error::AppError;
use crate::AppState;

/// GET /microfrontends - 登録済み一覧
pub async fn list_microfrontends(State(state): State<AppState>) -> Json<Vec<MicrofrontendEntry>> {
    Json(state.registry.list().await)
}

/// POST /microfrontends - 登録
pub async fn register_microfrontend(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(req) = payload.map_err(|e| RegistryError::invalid("body", e.body_text()))?;
    state.registry.register(req).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /microfrontends/close?name=<name> - 登録解除
pub async fn close_microfrontend(
    State(state): State<AppState>,
    query: Result<Query<CloseQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Query(query) = query.map_err(|e| RegistryError::invalid("name", e.body_text()))?;
    let name = query.name.unwrap_or_default();
    state.registry.deregister(&name).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /microfrontends/:name - 登録解除
pub async fn delete_microfrontend(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.registry.deregister(&name).await?;
    Ok(Json(SuccessResponse::ok()))
}
