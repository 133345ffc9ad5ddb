//! Vendor HTTP Client - 各厂商适配器共用的 HTTP 工具
//!
//! - 统一的 reqwest Client（超时来自配置）
//! - 非 2xx 状态 → `TtsError::UpstreamHttp`（保留状态码和响应体）
//! - 音频响应读取：二进制 body 或 JSON 信封中的 base64 字段

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::application::ports::TtsError;
use crate::domain::service::ServiceId;
use crate::domain::speech::{AudioPayload, MIME_MPEG};

/// 厂商 HTTP 客户端
///
/// 内部的 `reqwest::Client` 自带连接池，clone 代价很低
#[derive(Debug, Clone)]
pub struct VendorHttpClient {
    client: Client,
}

impl VendorHttpClient {
    /// 创建新的 HTTP 客户端
    pub fn new(timeout: Duration) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TtsError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// 下载远程音频文件
    pub async fn download(&self, url: &str) -> Result<AudioPayload, TtsError> {
        tracing::debug!(url = %url, "Downloading audio");

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        read_audio(response, &[]).await
    }
}

/// 检查凭证，缺失时直接失败（不发请求）
pub(crate) fn require_credential(
    credential: Option<&str>,
    service: ServiceId,
) -> Result<&str, TtsError> {
    credential.ok_or(TtsError::NotConfigured {
        service: service.display_name(),
    })
}

/// 拼接 API 地址，容忍 base_url 末尾的 `/`
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// 非 2xx 状态转换为错误，附带厂商返回的响应体
pub(crate) async fn ensure_success(response: Response) -> Result<Response, TtsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = if text.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        text
    };

    Err(TtsError::UpstreamHttp {
        status: status.as_u16(),
        body,
    })
}

/// 读取音频响应
///
/// `json_pointers` 为 JSON 信封中 base64 音频字段的位置（按顺序尝试），
/// 仅当 `Content-Type` 为 JSON 时使用
pub(crate) async fn read_audio(
    response: Response,
    json_pointers: &[&str],
) -> Result<AudioPayload, TtsError> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.contains("application/json") {
        let envelope: serde_json::Value = response.json().await?;
        return audio_from_json(&envelope, json_pointers);
    }

    let mime_type = if content_type.starts_with("audio/") {
        content_type
            .split(';')
            .next()
            .unwrap_or(MIME_MPEG)
            .trim()
            .to_string()
    } else {
        MIME_MPEG.to_string()
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TtsError::protocol(format!("Failed to read audio: {}", e)))?;

    if bytes.is_empty() {
        return Err(TtsError::protocol("Empty audio payload"));
    }

    Ok(AudioPayload::new(bytes.to_vec(), mime_type))
}

/// 从 JSON 信封中提取 base64 音频
pub(crate) fn audio_from_json(
    envelope: &serde_json::Value,
    json_pointers: &[&str],
) -> Result<AudioPayload, TtsError> {
    let encoded = json_pointers
        .iter()
        .find_map(|pointer| envelope.pointer(pointer).and_then(|v| v.as_str()))
        .ok_or_else(|| TtsError::protocol("No audio data in response"))?;

    let audio = AudioPayload::from_base64(encoded, MIME_MPEG)
        .map_err(|e| TtsError::protocol(format!("Invalid audio data: {}", e)))?;

    if audio.is_empty() {
        return Err(TtsError::protocol("Empty audio payload"));
    }

    Ok(audio)
}
