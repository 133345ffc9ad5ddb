//! Papla TTS Client
//!
//! 外部 API:
//! POST {base}/v1/text-to-speech
//! Headers: `papla-api-key`
//! Response: audio/mpeg binary
//!
//! Papla 的音色由 `{language, gender, style}` 描述，不使用音色 ID

use async_trait::async_trait;
use serde::Serialize;
use std::time::Instant;

use super::http_client::{ensure_success, join_url, read_audio, require_credential, VendorHttpClient};
use crate::application::ports::{TtsEnginePort, TtsError};
use crate::config::VendorConfig;
use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse, VoiceGender};

const API_KEY_HEADER: &str = "papla-api-key";

fn voice_for(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => "female",
        VoiceGender::Male => "male",
    }
}

#[derive(Debug, Serialize)]
struct PaplaBody<'a> {
    text: &'a str,
    voice: PaplaVoice<'a>,
    audio_format: &'static str,
    sample_rate: u32,
    quality: &'static str,
}

#[derive(Debug, Serialize)]
struct PaplaVoice<'a> {
    language: &'a str,
    gender: &'static str,
    style: &'static str,
}

/// Papla 客户端
pub struct PaplaClient {
    http: VendorHttpClient,
    config: VendorConfig,
}

impl PaplaClient {
    pub fn new(http: VendorHttpClient, config: VendorConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TtsEnginePort for PaplaClient {
    fn service(&self) -> ServiceId {
        ServiceId::Papla
    }

    fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    fn endpoint(&self) -> String {
        join_url(&self.config.base_url, "/v1/text-to-speech")
    }

    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError> {
        let started = Instant::now();
        let api_key = require_credential(self.config.credential(), self.service())?;

        let body = PaplaBody {
            text: request.text(),
            voice: PaplaVoice {
                language: request.language().as_str(),
                gender: voice_for(request.voice_gender()),
                style: "neutral",
            },
            audio_format: "mp3",
            sample_rate: 22050,
            quality: "high",
        };

        let response = self
            .http
            .client()
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let audio = read_audio(response, &["/audio"]).await?;

        Ok(TtsResponse::from_audio(&audio, request, started.elapsed()))
    }
}
