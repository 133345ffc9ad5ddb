//! 音频负载与 Data URI 编解码
//!
//! 厂商返回的原始音频统一编码为 `data:<mime>;base64,<payload>`，
//! 浏览器可直接播放，无需二次请求

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::DataUriError;

pub const MIME_MPEG: &str = "audio/mpeg";
pub const MIME_WAV: &str = "audio/wav";

/// 原始音频数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioPayload {
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn mpeg(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, MIME_MPEG)
    }

    pub fn wav(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, MIME_WAV)
    }

    /// 从 base64 字段解码（JSON 信封中的音频）
    pub fn from_base64(encoded: &str, mime_type: impl Into<String>) -> Result<Self, DataUriError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        Ok(Self::new(bytes, mime_type))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_data_uri(&self) -> String {
        encode_data_uri(&self.bytes, &self.mime_type)
    }
}

/// 编码为 base64 Data URI
pub fn encode_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// 解码 base64 Data URI
pub fn decode_data_uri(uri: &str) -> Result<AudioPayload, DataUriError> {
    let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
    let (meta, payload) = rest.split_once(',').ok_or(DataUriError::MissingScheme)?;
    let mime_type = meta.strip_suffix(";base64").ok_or(DataUriError::NotBase64)?;
    AudioPayload::from_base64(payload, mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_round_trip() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        let uri = encode_data_uri(&bytes, MIME_MPEG);
        assert!(uri.starts_with("data:audio/mpeg;base64,"));

        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded.mime_type, MIME_MPEG);
        assert_eq!(decoded.len(), bytes.len());
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn test_decode_rejects_plain_url() {
        assert!(matches!(
            decode_data_uri("https://cdn.example.com/a.mp3"),
            Err(DataUriError::MissingScheme)
        ));
    }

    #[test]
    fn test_decode_rejects_non_base64_uri() {
        assert!(matches!(
            decode_data_uri("data:audio/wav,RIFF"),
            Err(DataUriError::NotBase64)
        ));
    }

    #[test]
    fn test_from_base64_invalid() {
        assert!(AudioPayload::from_base64("%%%", MIME_MPEG).is_err());
    }
}
