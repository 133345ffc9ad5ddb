//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::dispatcher::DispatchError;
use crate::domain::speech::SpeechValidationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误（请求不会到达任何适配器）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 未知服务
    #[error("Unknown TTS service: {0}")]
    UnknownService(String),

    /// 合成失败（配置缺失、上游错误、超时等）
    #[error("{0}")]
    SynthesisFailed(DispatchError),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 是否为调用方输入问题
    ///
    /// 未知服务不算：单服务合成把它当作调度失败处理
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

impl From<SpeechValidationError> for ApplicationError {
    fn from(err: SpeechValidationError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<DispatchError> for ApplicationError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnknownService(id) => Self::UnknownService(id),
            other => Self::SynthesisFailed(other),
        }
    }
}
