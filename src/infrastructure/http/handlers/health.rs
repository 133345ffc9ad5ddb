//! Health / Service Catalog Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetHealth, ListServices};
use crate::infrastructure::http::dto::{HealthResponseDto, ServiceInfoDto};
use crate::infrastructure::http::state::AppState;

/// 健康检查：各服务是否已配置凭证
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponseDto> {
    Json(state.health_handler.handle(GetHealth).into())
}

/// 服务目录
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<ServiceInfoDto>> {
    let services = state
        .list_services_handler
        .handle(ListServices)
        .into_iter()
        .map(ServiceInfoDto::from)
        .collect();
    Json(services)
}
