//! Speechify TTS Client
//!
//! 外部 API:
//! POST {base}/v1/audio/speech
//! Headers: `Authorization: Bearer <key>`
//! Response: 二进制音频，或 JSON `{"audio_data": "<base64>"}`

use async_trait::async_trait;
use serde::Serialize;
use std::time::Instant;

use super::http_client::{ensure_success, join_url, read_audio, require_credential, VendorHttpClient};
use crate::application::ports::{TtsEnginePort, TtsError};
use crate::config::VendorConfig;
use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse, VoiceGender};

fn voice_for(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => "mimi",
        VoiceGender::Male => "henry",
    }
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    input: &'a str,
    voice_id: &'a str,
    audio_format: &'static str,
    sample_rate: u32,
    speed: f32,
}

/// Speechify 客户端
pub struct SpeechifyClient {
    http: VendorHttpClient,
    config: VendorConfig,
}

impl SpeechifyClient {
    pub fn new(http: VendorHttpClient, config: VendorConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TtsEnginePort for SpeechifyClient {
    fn service(&self) -> ServiceId {
        ServiceId::Speechify
    }

    fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    fn endpoint(&self) -> String {
        join_url(&self.config.base_url, "/v1/audio/speech")
    }

    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError> {
        let started = Instant::now();
        let api_key = require_credential(self.config.credential(), self.service())?;

        let body = SpeechBody {
            input: request.text(),
            voice_id: voice_for(request.voice_gender()),
            audio_format: "mp3",
            sample_rate: 22050,
            speed: 1.0,
        };

        let response = self
            .http
            .client()
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let audio = read_audio(response, &["/audio_data"]).await?;

        Ok(TtsResponse::from_audio(&audio, request, started.elapsed()))
    }
}
