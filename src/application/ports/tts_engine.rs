//! TTS Engine Port - 厂商语音合成抽象
//!
//! 定义单个 TTS 厂商的合成接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse};

/// TTS 错误
///
/// 每个适配器的失败都落到这里的某一类，不在适配器内部吞掉
#[derive(Debug, Error)]
pub enum TtsError {
    /// 缺少凭证，未发出任何网络请求
    #[error("API key not configured")]
    NotConfigured { service: &'static str },

    /// 厂商返回非 2xx
    #[error("HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// 厂商返回 2xx，但负载形状不符合预期
    #[error("Invalid response: {0}")]
    UpstreamProtocol(String),

    /// 轮询次数耗尽仍未到达终态
    #[error("Job timed out after {attempts} polls")]
    Timeout { attempts: u32 },

    /// 异步任务被厂商标记为失败
    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    /// 本地音频编码失败（demo 引擎）
    #[error("Audio encoding failed: {0}")]
    Encoding(String),
}

impl TtsError {
    /// 稳定的错误类别标签（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured { .. } => "configuration",
            Self::UpstreamHttp { .. } => "upstream_http",
            Self::UpstreamProtocol(_) => "upstream_protocol",
            Self::Timeout { .. } => "timeout",
            Self::JobFailed(_) => "job_failed",
            Self::Network(_) => "network",
            Self::Encoding(_) => "encoding",
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::UpstreamProtocol(message.into())
    }
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TtsError::Network(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            TtsError::Network(format!("Cannot connect to TTS service: {}", e))
        } else if e.is_decode() {
            TtsError::UpstreamProtocol(format!("Failed to decode response: {}", e))
        } else {
            TtsError::Network(e.to_string())
        }
    }
}

/// Speech Synthesizer Port
///
/// 每个 TTS 厂商一个实现
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 对应的服务 ID
    fn service(&self) -> ServiceId;

    /// 是否已配置凭证
    fn is_configured(&self) -> bool;

    /// 合成接口地址（仅用于健康检查展示）
    fn endpoint(&self) -> String;

    /// 执行合成
    ///
    /// 成功时返回可播放的 Data URI、音频大小与耗时
    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError>;
}
