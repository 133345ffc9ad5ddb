//! Demo TTS Engine - 无需 API Key 的本地演示引擎
//!
//! 不发网络请求，根据文本长度生成一段衰减的正弦波 WAV，
//! 用于在没有任何厂商凭证时验证整条链路

use async_trait::async_trait;
use std::f32::consts::PI;
use std::io::Cursor;
use std::time::Instant;

use crate::application::ports::{TtsEnginePort, TtsError};
use crate::domain::service::ServiceId;
use crate::domain::speech::{AudioPayload, TtsRequest, TtsResponse, VoiceGender};

const SAMPLE_RATE: u32 = 22050;
const SECONDS_PER_CHAR: f32 = 0.1;
const MAX_SECONDS: f32 = 3.0;

/// Demo 引擎
#[derive(Debug, Default)]
pub struct DemoTtsEngine;

impl DemoTtsEngine {
    pub fn new() -> Self {
        Self
    }
}

/// 生成单声道 16-bit WAV
pub(crate) fn render_tone(text_length: usize, gender: VoiceGender) -> Result<Vec<u8>, hound::Error> {
    let duration = (text_length as f32 * SECONDS_PER_CHAR).min(MAX_SECONDS);
    let samples = (SAMPLE_RATE as f32 * duration) as u32;
    let base_freq = match gender {
        VoiceGender::Female => 440.0,
        VoiceGender::Male => 220.0,
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::with_capacity(44 + samples as usize * 2);
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec)?;
        for i in 0..samples {
            let t = i as f32 / SAMPLE_RATE as f32;
            let freq = base_freq + (t * 2.0).sin() * 50.0;
            let value = (2.0 * PI * freq * t).sin() * 0.3 * (-t * 0.5).exp();
            let sample = (value.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }

    Ok(buffer)
}

#[async_trait]
impl TtsEnginePort for DemoTtsEngine {
    fn service(&self) -> ServiceId {
        ServiceId::Demo
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn endpoint(&self) -> String {
        "internal".to_string()
    }

    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError> {
        let started = Instant::now();

        let bytes = render_tone(request.text_length(), request.voice_gender())
            .map_err(|e| TtsError::Encoding(e.to_string()))?;
        let audio = AudioPayload::wav(bytes);

        tracing::debug!(audio_size = audio.len(), "Demo audio generated");

        Ok(TtsResponse::from_audio(&audio, request, started.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::decode_data_uri;

    #[test]
    fn test_render_tone_size_follows_text_length() {
        // 5 字符 → 0.5 秒 → 11025 个采样
        let wav = render_tone(5, VoiceGender::Female).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 11025 * 2);
    }

    #[test]
    fn test_render_tone_is_capped_at_three_seconds() {
        let wav = render_tone(4000, VoiceGender::Male).unwrap();
        assert_eq!(wav.len(), 44 + (SAMPLE_RATE as usize * 3) * 2);
    }

    #[tokio::test]
    async fn test_synthesize_returns_wav_data_uri() {
        let request = TtsRequest::parse("Hello", "en", "female").unwrap();
        let response = DemoTtsEngine::new().synthesize(&request).await.unwrap();

        assert!(response.audio_url.starts_with("data:audio/wav;base64,"));
        assert_eq!(response.text_length, 5);

        let decoded = decode_data_uri(&response.audio_url).unwrap();
        assert_eq!(decoded.len() as u64, response.audio_size);

        let reader = hound::WavReader::new(Cursor::new(decoded.bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
        assert_eq!(reader.len(), 11025);
    }
}
