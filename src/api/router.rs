//! 接口路由
//!
//! 所有接口挂在 `/api/` 下，允许跨域访问。

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::clients::TextGenerator;
use crate::services::GuwenService;

/// 构建接口路由
pub fn router<G: TextGenerator>(service: Arc<GuwenService<G>>) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze::<G>))
        .route("/api/qa", post(handlers::qa::<G>))
        .route("/api/auto-annotate", post(handlers::auto_annotate::<G>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
