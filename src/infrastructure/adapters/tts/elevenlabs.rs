//! ElevenLabs TTS Client
//!
//! 外部 API:
//! POST {base}/v1/text-to-speech/{voice_id}
//! Headers: `xi-api-key`, `Accept: audio/mpeg`
//! Response: audio/mpeg binary
//!
//! 可选：合成前 GET {base}/v1/voices 按性别挑选音色

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::http_client::{ensure_success, join_url, read_audio, require_credential, VendorHttpClient};
use crate::application::ports::{TtsEnginePort, TtsError};
use crate::config::ElevenLabsConfig;
use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse, VoiceGender};

const API_KEY_HEADER: &str = "xi-api-key";

/// 静态音色表
fn default_voice(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => "EXAVITQu4vr4xnVDxDCA", // Bella
        VoiceGender::Male => "pNInz6obpgDQGcFmaJgB",   // Adam
    }
}

#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceEntry>,
}

#[derive(Debug, Deserialize)]
struct VoiceEntry {
    voice_id: String,
    name: String,
    #[serde(default)]
    labels: Option<VoiceLabels>,
}

#[derive(Debug, Deserialize)]
struct VoiceLabels {
    gender: Option<String>,
}

/// 从音色列表中挑选：名称匹配 / 标签匹配优先，否则取第一个
fn pick_voice(voices: &[VoiceEntry], gender: VoiceGender) -> Option<&VoiceEntry> {
    let preferred_name = match gender {
        VoiceGender::Female => "bella",
        VoiceGender::Male => "adam",
    };

    voices
        .iter()
        .find(|voice| {
            voice.name.to_lowercase().contains(preferred_name)
                || voice
                    .labels
                    .as_ref()
                    .and_then(|l| l.gender.as_deref())
                    .is_some_and(|g| g.eq_ignore_ascii_case(gender.as_str()))
        })
        .or_else(|| voices.first())
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    http: VendorHttpClient,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    pub fn new(http: VendorHttpClient, config: ElevenLabsConfig) -> Self {
        Self { http, config }
    }

    fn speech_url(&self, voice_id: &str) -> String {
        join_url(
            &self.config.base_url,
            &format!("/v1/text-to-speech/{}", voice_id),
        )
    }

    /// 查询音色列表；任何失败都回退到静态音色表
    async fn select_voice(&self, api_key: &str, gender: VoiceGender) -> String {
        if !self.config.voice_lookup {
            return default_voice(gender).to_string();
        }

        match self.fetch_voices(api_key).await {
            Ok(voices) => match pick_voice(&voices, gender) {
                Some(voice) => {
                    tracing::debug!(
                        voice_name = %voice.name,
                        voice_id = %voice.voice_id,
                        "Using ElevenLabs voice"
                    );
                    voice.voice_id.clone()
                }
                None => default_voice(gender).to_string(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "ElevenLabs voice lookup failed, using default voice");
                default_voice(gender).to_string()
            }
        }
    }

    async fn fetch_voices(&self, api_key: &str) -> Result<Vec<VoiceEntry>, TtsError> {
        let response = self
            .http
            .client()
            .get(join_url(&self.config.base_url, "/v1/voices"))
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let voices: VoicesResponse = response.json().await?;
        Ok(voices.voices)
    }
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    fn service(&self) -> ServiceId {
        ServiceId::ElevenLabs
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

        let voice_id = self.select_voice(api_key, request.voice_gender()).await;
        let body = SynthesisBody {
            text: request.text(),
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .http
            .client()
            .post(self.speech_url(&voice_id))
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let audio = read_audio(response, &["/audio_base64"]).await?;

        Ok(TtsResponse::from_audio(&audio, request, started.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{any, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, api_key: Option<&str>, voice_lookup: bool) -> ElevenLabsClient {
        let config = ElevenLabsConfig {
            api_key: api_key.map(String::from),
            base_url: server.uri(),
            voice_lookup,
            ..Default::default()
        };
        ElevenLabsClient::new(VendorHttpClient::new(Duration::from_secs(5)).unwrap(), config)
    }

    fn entry(id: &str, name: &str, gender: Option<&str>) -> VoiceEntry {
        VoiceEntry {
            voice_id: id.to_string(),
            name: name.to_string(),
            labels: Some(VoiceLabels {
                gender: gender.map(String::from),
            }),
        }
    }

    #[test]
    fn test_pick_voice_matches_name_or_label_else_first() {
        let voices = vec![
            entry("1", "Rachel", Some("female")),
            entry("2", "Bella", Some("female")),
            entry("3", "Josh", Some("male")),
        ];
        assert_eq!(pick_voice(&voices, VoiceGender::Female).unwrap().voice_id, "1");
        assert_eq!(pick_voice(&voices, VoiceGender::Male).unwrap().voice_id, "3");

        let unlabeled = vec![entry("9", "Narrator", None)];
        assert_eq!(pick_voice(&unlabeled, VoiceGender::Male).unwrap().voice_id, "9");
        assert!(pick_voice(&[], VoiceGender::Male).is_none());
    }

    #[tokio::test]
    async fn test_synthesize_with_static_voice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/EXAVITQu4vr4xnVDxDCA"))
            .and(header("xi-api-key", "el-key"))
            .and(header("accept", "audio/mpeg"))
            .and(body_partial_json(serde_json::json!({
                "text": "Hello",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": { "use_speaker_boost": true }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![3u8; 2048]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hello", "en", "female").unwrap();
        let response = client(&server, Some("el-key"), false)
            .synthesize(&request)
            .await
            .unwrap();

        assert_eq!(response.audio_size, 2048);
        assert_eq!(response.text_length, 5);
        assert!(response.audio_url.starts_with("data:audio/mpeg;base64,"));
    }

    #[tokio::test]
    async fn test_voice_lookup_selects_matching_voice() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/voices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "voices": [
                    { "voice_id": "v-f", "name": "Bella", "labels": { "gender": "female" } },
                    { "voice_id": "v-m", "name": "Adam", "labels": { "gender": "male" } }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/v-m"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 10]))
            .expect(1)
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hi", "en", "male").unwrap();
        let response = client(&server, Some("el-key"), true)
            .synthesize(&request)
            .await
            .unwrap();

        assert_eq!(response.audio_size, 10);
    }

    #[tokio::test]
    async fn test_voice_lookup_failure_falls_back_to_static_voice() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/voices"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/pNInz6obpgDQGcFmaJgB"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 10]))
            .expect(1)
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hi", "en", "male").unwrap();
        assert!(client(&server, Some("el-key"), true)
            .synthesize(&request)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"detail":"invalid_api_key"}"#),
            )
            .mount(&server)
            .await;

        let request = TtsRequest::parse("Hello", "en", "female").unwrap();
        let err = client(&server, Some("bad"), false)
            .synthesize(&request)
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::UpstreamHttp { status: 401, ref body } if body.contains("invalid_api_key")));
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let engine = client(&server, None, true);
        assert!(!engine.is_configured());

        let request = TtsRequest::parse("Hello", "en", "female").unwrap();
        let err = engine.synthesize(&request).await.unwrap_err();
        assert!(matches!(err, TtsError::NotConfigured { .. }));
    }
}
