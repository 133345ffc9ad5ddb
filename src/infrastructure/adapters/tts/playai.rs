//! PlayAI TTS Client
//!
//! 外部 API:
//! POST {base}/api/v1/tts           创建合成任务
//! GET  {base}/api/v1/tts/{job_id}  查询任务状态
//! Headers: `Authorization: Bearer <key>`, `X-USER-ID`
//!
//! 创建任务的响应可能直接带 `output.url`，也可能只有任务 ID；
//! 后者需要轮询直到 completed / failed / 次数耗尽，最后下载音频

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::http_client::{ensure_success, join_url, require_credential, VendorHttpClient};
use crate::application::ports::{TtsEnginePort, TtsError};
use crate::config::PlayAiConfig;
use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse, VoiceGender};

const USER_ID_HEADER: &str = "X-USER-ID";

fn voice_for(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => {
            "s3://voice-cloning-zero-shot/d9ff78ba-d016-47f6-b0ef-dd630f59414e/female-cs/manifest.json"
        }
        VoiceGender::Male => {
            "s3://voice-cloning-zero-shot/820a3788-2b37-4d21-847a-b65d8a68c99a/male-cs/manifest.json"
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateJobBody<'a> {
    text: &'a str,
    voice: &'static str,
    output_format: &'static str,
    sample_rate: u32,
    speed: f32,
    emotion: &'static str,
}

/// 任务创建 / 状态响应（两者形状相同）
#[derive(Debug, Deserialize)]
struct JobResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<JobOutput>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct JobOutput {
    #[serde(default)]
    url: Option<String>,
}

impl JobResponse {
    fn output_url(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.url.as_deref())
    }

    fn error_message(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(msg)) if !msg.is_empty() => msg.clone(),
            Some(serde_json::Value::Null) | None => "Unknown error".to_string(),
            Some(serde_json::Value::String(_)) => "Unknown error".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// PlayAI 客户端
pub struct PlayAiClient {
    http: VendorHttpClient,
    config: PlayAiConfig,
}

impl PlayAiClient {
    pub fn new(http: VendorHttpClient, config: PlayAiConfig) -> Self {
        Self { http, config }
    }

    fn job_url(&self, job_id: &str) -> String {
        join_url(&self.config.base_url, &format!("/api/v1/tts/{}", job_id))
    }

    async fn create_job(&self, api_key: &str, request: &TtsRequest) -> Result<JobResponse, TtsError> {
        let body = CreateJobBody {
            text: request.text(),
            voice: voice_for(request.voice_gender()),
            output_format: "mp3",
            sample_rate: 24000,
            speed: 1.0,
            emotion: "neutral",
        };

        let response = self
            .http
            .client()
            .post(self.endpoint())
            .bearer_auth(api_key)
            .header(USER_ID_HEADER, &self.config.user_id)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// 轮询任务直到终态
    ///
    /// 最多 `max_poll_attempts` 次，两次轮询之间等待 `poll_interval`，
    /// 最后一次轮询后不再等待
    async fn poll_job(&self, api_key: &str, job_id: &str) -> Result<String, TtsError> {
        let attempts = self.config.max_poll_attempts;
        let interval = self.config.poll_interval();
        let url = self.job_url(job_id);

        for attempt in 1..=attempts {
            let response = self
                .http
                .client()
                .get(&url)
                .bearer_auth(api_key)
                .header(USER_ID_HEADER, &self.config.user_id)
                .send()
                .await?;
            let response = ensure_success(response).await?;
            let job: JobResponse = response.json().await?;

            match job.status.as_deref() {
                Some("completed") => {
                    return job.output_url().map(str::to_string).ok_or_else(|| {
                        TtsError::protocol("Completed job has no output URL")
                    });
                }
                Some("failed") => {
                    return Err(TtsError::JobFailed(job.error_message()));
                }
                status => {
                    tracing::debug!(
                        job_id = %job_id,
                        attempt,
                        status = ?status,
                        "PlayAI job pending"
                    );
                }
            }

            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }

        tracing::warn!(job_id = %job_id, attempts, "PlayAI job timed out");
        Err(TtsError::Timeout { attempts })
    }
}

#[async_trait]
impl TtsEnginePort for PlayAiClient {
    fn service(&self) -> ServiceId {
        ServiceId::PlayAi
    }

    fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    fn endpoint(&self) -> String {
        join_url(&self.config.base_url, "/api/v1/tts")
    }

    async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError> {
        let started = Instant::now();
        let api_key = require_credential(self.config.credential(), self.service())?;

        let job = self.create_job(api_key, request).await?;

        let audio_url = match (job.output_url(), job.id.as_deref()) {
            (Some(url), _) => url.to_string(),
            (None, Some(job_id)) => {
                tracing::debug!(job_id = %job_id, "PlayAI job created, polling");
                self.poll_job(api_key, job_id).await?
            }
            (None, None) => {
                return Err(TtsError::protocol(
                    "No audio URL or job ID received from PlayAI",
                ));
            }
        };

        let audio_url = reqwest::Url::parse(&audio_url).map_err(|e| {
            TtsError::protocol(format!("Invalid audio URL {:?}: {}", audio_url, e))
        })?;
        let audio = self.http.download(audio_url.as_str()).await?;

        Ok(TtsResponse::from_audio(&audio, request, started.elapsed()))
    }
}
