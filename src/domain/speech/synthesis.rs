//! 合成结果

use std::time::Duration;

use super::audio::AudioPayload;
use super::value_objects::TtsRequest;

/// 成功的合成结果
///
/// 失败不用本类型表示，统一走 `Result` 的 `Err` 分支
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsResponse {
    /// 可直接播放的 URI（Data URI）
    pub audio_url: String,
    /// 音频字节数
    pub audio_size: u64,
    /// 从调用开始到拿到音频的耗时（毫秒）
    pub generation_time_ms: u64,
    /// 请求文本字符数
    pub text_length: usize,
}

impl TtsResponse {
    pub fn from_audio(audio: &AudioPayload, request: &TtsRequest, elapsed: Duration) -> Self {
        Self {
            audio_url: audio.to_data_uri(),
            audio_size: audio.len() as u64,
            generation_time_ms: elapsed.as_millis() as u64,
            text_length: request.text_length(),
        }
    }
}
