//! HTTP Routes
//!
//! API Endpoints:
//! - /api/tts?service=<id>  POST  单服务合成
//! - /api/tts/compare       POST  多服务对比
//! - /api/health            GET   健康检查（仅报告凭证是否配置）
//! - /api/services          GET   服务目录

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/services", get(handlers::list_services))
        .route("/tts", post(handlers::synthesize))
        .route("/tts/compare", post(handlers::compare))
}
