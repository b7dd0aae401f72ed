//! REST APIハンドラー
//!
//! マイクロフロントエンドの登録・登録解除・一覧

pub mod error;
pub mod microfrontends;

use crate::AppState;
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/microfrontends",
            get(microfrontends::list_microfrontends).post(microfrontends::register_microfrontend),
        )
        .route("/microfrontends/close", get(microfrontends::close_microfrontend))
        .route("/microfrontends/:name", delete(microfrontends::delete_microfrontend))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
