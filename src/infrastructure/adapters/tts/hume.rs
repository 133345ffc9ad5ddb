//! Hume TTS Client
//!
//! 外部 API:
//! POST {base}/v0/tts/inference
//! Headers: `X-Hume-Api-Key`
//! Response: JSON（base64 音频）或二进制音频，按 Content-Type 区分
//!
//! Hume 通过自然语言描述生成音色

use async_trait::async_trait;
use serde::Serialize;
use std::time::Instant;

use super::http_client::{ensure_success, join_url, read_audio, require_credential, VendorHttpClient};
use crate::application::ports::{TtsEnginePort, TtsError};
use crate::config::VendorConfig;
use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse, VoiceGender};

const API_KEY_HEADER: &str = "X-Hume-Api-Key";

/// JSON 信封中音频字段的位置
const AUDIO_POINTERS: &[&str] = &["/audio", "/generations/0/audio"];

fn voice_description(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => {
            "A warm, clear female voice with natural intonation and professional delivery"
        }
        VoiceGender::Male => {
            "A confident, clear male voice with natural intonation and professional delivery"
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceBody<'a> {
    text: &'a str,
    format: &'static str,
    sample_rate: u32,
    voice: HumeVoice<'a>,
    prosody: Prosody,
}

#[derive(Debug, Serialize)]
struct HumeVoice<'a> {
    description: &'static str,
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct Prosody {
    speed: f32,
    pitch: f32,
    energy: f32,
}

/// Hume 客户端
pub struct HumeClient {
    http: VendorHttpClient,
    config: VendorConfig,
}

impl HumeClient {
    pub fn new(http: VendorHttpClient, config: VendorConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TtsEnginePort for HumeClient {
    fn service(&self) -> ServiceId {
        ServiceId::Hume
    }

    fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    fn endpoint(&self) -> String {
        join_url(&self.config.base_url, "/v0/tts/inference")
    }

    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError> {
        let started = Instant::now();
        let api_key = require_credential(self.config.credential(), self.service())?;

        let body = InferenceBody {
            text: request.text(),
            format: "mp3",
            sample_rate: 22050,
            voice: HumeVoice {
                description: voice_description(request.voice_gender()),
                language: request.language().as_str(),
            },
            prosody: Prosody {
                speed: 1.0,
                pitch: 0.0,
                energy: 0.5,
            },
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
        let audio = read_audio(response, AUDIO_POINTERS).await?;

        Ok(TtsResponse::from_audio(&audio, request, started.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::decode_data_uri;
    use std::time::Duration;
    use wiremock::matchers::{any, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HumeClient {
        let config = VendorConfig::new(server.uri()).with_api_key("hu-key");
        HumeClient::new(VendorHttpClient::new(Duration::from_secs(5)).unwrap(), config)
    }

    #[tokio::test]
    async fn test_json_response_with_base64_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/tts/inference"))
            .and(header("x-hume-api-key", "hu-key"))
            .and(body_partial_json(serde_json::json!({
                "voice": { "language": "en" },
                "prosody": { "energy": 0.5 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "audio": "SUQzBAAAAAAA"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hello", "en", "female").unwrap();
        let response = client(&server).synthesize(&request).await.unwrap();

        let decoded = decode_data_uri(&response.audio_url).unwrap();
        assert_eq!(&decoded.bytes[..3], b"ID3");
        assert_eq!(response.audio_size, 9);
    }

    #[tokio::test]
    async fn test_binary_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![8u8; 1000]),
            )
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hello", "en", "male").unwrap();
        let response = client(&server).synthesize(&request).await.unwrap();

        assert_eq!(response.audio_size, 1000);
    }

    #[tokio::test]
    async fn test_json_without_audio_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generations": [] })),
            )
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hello", "en", "male").unwrap();
        let err = client(&server).synthesize(&request).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid response: No audio data in response");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let engine = HumeClient::new(
            VendorHttpClient::new(Duration::from_secs(5)).unwrap(),
            VendorConfig::new(server.uri()),
        );
        assert!(!engine.is_configured());

        let request = TtsRequest::parse("Hi", "en", "female").unwrap();
        let err = engine.synthesize(&request).await.unwrap_err();
        assert!(matches!(err, TtsError::NotConfigured { service: "Hume AI" }));
    }
}
