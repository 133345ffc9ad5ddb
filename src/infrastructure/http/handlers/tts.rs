//! TTS Handlers
//!
//! - POST /api/tts?service=<id>   单服务合成
//! - POST /api/tts/compare        多服务对比

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{ApplicationError, CompareCommand, SynthesizeCommand};
use crate::infrastructure::http::dto::{
    CompareRequestBody, CompareResultDto, ServiceQuery, TtsRequestBody, TtsResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Synthesize
// ============================================================================

/// 单服务合成
///
/// 输入错误返回 400，调度失败（含未知服务）返回 500，成功才返回 200
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ServiceQuery>, QueryRejection>,
    payload: Result<Json<TtsRequestBody>, JsonRejection>,
) -> Result<Json<TtsResponseDto>, ApiError> {
    let Query(query) = query?;
    let service = query.require()?;
    let Json(body) = payload?;
    let fields = body.require()?;

    let cmd = SynthesizeCommand {
        service,
        text: fields.text,
        language: fields.language,
        voice_gender: fields.voice_gender,
    };

    let response = state.synthesize_handler.handle(cmd).await?;
    Ok(Json(response.into()))
}

// ============================================================================
// Compare
// ============================================================================

/// 多服务对比
///
/// 单个服务失败体现在结果项中，整体仍返回 200；
/// `services` 中的未知 ID 属于调用方输入，整体返回 400
pub async fn compare(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareRequestBody>, JsonRejection>,
) -> Result<Json<Vec<CompareResultDto>>, ApiError> {
    let Json(body) = payload?;
    let fields = body.request.require()?;

    let cmd = CompareCommand {
        services: body.services,
        text: fields.text,
        language: fields.language,
        voice_gender: fields.voice_gender,
    };

    let response = state.compare_handler.handle(cmd).await.map_err(|e| match e {
        e @ ApplicationError::UnknownService(_) => ApiError::BadRequest(e.to_string()),
        other => ApiError::from(other),
    })?;
    let results = response
        .results
        .into_iter()
        .map(CompareResultDto::from)
        .collect();
    Ok(Json(results))
}
