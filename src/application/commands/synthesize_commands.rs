//! Synthesize Commands - 语音合成相关命令

use crate::application::dispatcher::DispatchError;
use crate::domain::service::ServiceId;
use crate::domain::speech::TtsResponse;

/// 单服务合成命令
///
/// 字段保持调用方原始输入，由 handler 负责校验
#[derive(Debug, Clone)]
pub struct SynthesizeCommand {
    pub service: String,
    pub text: String,
    pub language: String,
    pub voice_gender: String,
}

/// 多服务对比命令
#[derive(Debug, Clone)]
pub struct CompareCommand {
    /// 为空时对比全部已注册服务
    pub services: Option<Vec<String>>,
    pub text: String,
    pub language: String,
    pub voice_gender: String,
}

/// 单个服务的对比结果
#[derive(Debug)]
pub struct ServiceOutcome {
    pub service: ServiceId,
    pub result: Result<TtsResponse, DispatchError>,
}

/// 对比响应（按完成先后排列）
#[derive(Debug)]
pub struct CompareResponse {
    pub results: Vec<ServiceOutcome>,
}
