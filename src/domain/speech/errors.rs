//! Speech Context - Errors

use thiserror::Error;

/// 请求校验错误
///
/// 在调用任何厂商适配器之前产生
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechValidationError {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text is too long: {len} characters (max {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("Invalid language code: {0:?} (expected ISO-639-1, e.g. \"en\")")]
    InvalidLanguage(String),

    #[error("Invalid voice gender: {0:?} (expected \"male\" or \"female\")")]
    InvalidVoiceGender(String),
}

/// Data URI 解析错误
#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("Not a data URI")]
    MissingScheme,

    #[error("Data URI is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}
