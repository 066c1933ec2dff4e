//! # アプリケーション構築
//!
//! ルーターとミドルウェアの構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## レイヤー構成（外側から）
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → PropagateRequestIdLayer → handler
//! ```

use std::sync::Arc;

use axum::{Router, routing::get};
use cabrithon_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{HealthState, database_info, health_check};

/// API のルートパス
pub const API_ROOT: &str = "/api/v1";

/// アプリケーションのルーターを構築する
pub fn build_app(health_state: Arc<HealthState>) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health_check))
        .route("/health/database", get(database_info))
        .with_state(health_state);

    Router::new()
        .nest(API_ROOT, health_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
