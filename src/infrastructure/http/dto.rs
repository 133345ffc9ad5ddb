//! Data Transfer Objects
//!
//! 对外 JSON 使用 camelCase，与浏览器端约定一致

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{HealthReport, ServiceInfo, ServiceOutcome};
use crate::domain::service::ServiceId;
use crate::domain::speech::TtsResponse;

use super::error::ApiError;

// ============================================================================
// TTS DTOs
// ============================================================================

/// `?service=<id>`
#[derive(Debug, Deserialize)]
pub struct ServiceQuery {
    #[serde(default)]
    pub service: Option<String>,
}

impl ServiceQuery {
    pub fn require(self) -> Result<String, ApiError> {
        self.service
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing service".to_string()))
    }
}

/// 合成请求体
///
/// 字段均为可选，缺失时返回明确的 400 而不是反序列化错误
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequestBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub voice_gender: Option<String>,
}

/// 已确认存在的请求字段
#[derive(Debug)]
pub struct RequiredFields {
    pub text: String,
    pub language: String,
    pub voice_gender: String,
}

impl TtsRequestBody {
    pub fn require(self) -> Result<RequiredFields, ApiError> {
        let missing = |field: &str| ApiError::BadRequest(format!("Missing {}", field));
        Ok(RequiredFields {
            text: self.text.ok_or_else(|| missing("text"))?,
            language: self.language.ok_or_else(|| missing("language"))?,
            voice_gender: self.voice_gender.ok_or_else(|| missing("voiceGender"))?,
        })
    }
}

/// 对比请求体
#[derive(Debug, Deserialize)]
pub struct CompareRequestBody {
    #[serde(flatten)]
    pub request: TtsRequestBody,
    #[serde(default)]
    pub services: Option<Vec<String>>,
}

/// 合成成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsResponseDto {
    pub audio_url: String,
    pub audio_size: u64,
    pub generation_time: u64,
    pub success: bool,
    pub text_length: usize,
}

impl From<TtsResponse> for TtsResponseDto {
    fn from(response: TtsResponse) -> Self {
        Self {
            audio_url: response.audio_url,
            audio_size: response.audio_size,
            generation_time: response.generation_time_ms,
            success: true,
            text_length: response.text_length,
        }
    }
}

/// 对比结果中的单个服务
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResultDto {
    pub service: ServiceId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ServiceOutcome> for CompareResultDto {
    fn from(outcome: ServiceOutcome) -> Self {
        match outcome.result {
            Ok(response) => Self {
                service: outcome.service,
                success: true,
                audio_url: Some(response.audio_url),
                audio_size: Some(response.audio_size),
                generation_time: Some(response.generation_time_ms),
                text_length: Some(response.text_length),
                error: None,
            },
            Err(e) => Self {
                service: outcome.service,
                success: false,
                audio_url: None,
                audio_size: None,
                generation_time: None,
                text_length: None,
                error: Some(e.to_string()),
            },
        }
    }
}

// ============================================================================
// Service DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ServiceStatusDto {
    pub configured: bool,
    pub endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponseDto {
    pub status: &'static str,
    pub timestamp: String,
    pub services: BTreeMap<ServiceId, ServiceStatusDto>,
    pub development_mode: bool,
    pub configured_services: Vec<ServiceId>,
}

impl From<HealthReport> for HealthResponseDto {
    fn from(report: HealthReport) -> Self {
        let configured_services = report.configured_services();
        Self {
            status: "healthy",
            timestamp: report.timestamp.to_rfc3339(),
            services: report
                .services
                .into_iter()
                .map(|s| {
                    (
                        s.service,
                        ServiceStatusDto {
                            configured: s.configured,
                            endpoint: s.endpoint,
                        },
                    )
                })
                .collect(),
            development_mode: report.development_mode,
            configured_services,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoDto {
    pub id: ServiceId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub configured: bool,
}

impl From<ServiceInfo> for ServiceInfoDto {
    fn from(info: ServiceInfo) -> Self {
        Self {
            id: info.descriptor.id,
            display_name: info.descriptor.display_name,
            description: info.descriptor.description,
            configured: info.configured,
        }
    }
}
