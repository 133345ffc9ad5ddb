//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::SpeechValidationError;

/// 单次合成允许的最大字符数
pub const MAX_TEXT_CHARS: usize = 5000;

/// 音色性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
}

impl VoiceGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for VoiceGender {
    type Err = SpeechValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(SpeechValidationError::InvalidVoiceGender(other.to_string())),
        }
    }
}

impl std::fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 语言代码（ISO-639-1，两位小写字母）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, SpeechValidationError> {
        let raw = code.as_ref();
        let trimmed = raw.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SpeechValidationError::InvalidLanguage(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 待合成文本
///
/// 保留调用方原文（不做 trim），只在校验时忽略首尾空白
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechText(String);

impl SpeechText {
    pub fn new(text: impl Into<String>) -> Result<Self, SpeechValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpeechValidationError::EmptyText);
        }
        let len = text.chars().count();
        if len > MAX_TEXT_CHARS {
            return Err(SpeechValidationError::TextTooLong {
                len,
                max: MAX_TEXT_CHARS,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 字符数（Unicode 标量值）
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// 规范化后的 TTS 请求
///
/// 只能通过校验构造，进入调度器的请求一定满足长度与取值约束
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsRequest {
    text: SpeechText,
    language: LanguageCode,
    voice_gender: VoiceGender,
}

impl TtsRequest {
    pub fn new(text: SpeechText, language: LanguageCode, voice_gender: VoiceGender) -> Self {
        Self {
            text,
            language,
            voice_gender,
        }
    }

    /// 从原始字符串校验并构造
    ///
    /// 校验顺序：文本 → 语言 → 性别，返回第一个失败项
    pub fn parse(
        text: impl Into<String>,
        language: &str,
        voice_gender: &str,
    ) -> Result<Self, SpeechValidationError> {
        let text = SpeechText::new(text)?;
        let language = LanguageCode::new(language)?;
        let voice_gender = voice_gender.parse()?;
        Ok(Self::new(text, language, voice_gender))
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn voice_gender(&self) -> VoiceGender {
        self.voice_gender
    }

    pub fn text_length(&self) -> usize {
        self.text.char_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_gender_parse() {
        assert_eq!("male".parse::<VoiceGender>().unwrap(), VoiceGender::Male);
        assert_eq!("female".parse::<VoiceGender>().unwrap(), VoiceGender::Female);
        assert_eq!(
            "robot".parse::<VoiceGender>(),
            Err(SpeechValidationError::InvalidVoiceGender("robot".to_string()))
        );
    }

    #[test]
    fn test_language_code_normalized() {
        let code = LanguageCode::new(" PL ").unwrap();
        assert_eq!(code.as_str(), "pl");
    }

    #[test]
    fn test_language_code_rejects_bad_shapes() {
        assert!(LanguageCode::new("").is_err());
        assert!(LanguageCode::new("eng").is_err());
        assert!(LanguageCode::new("e1").is_err());
    }

    #[test]
    fn test_speech_text_rejects_blank() {
        assert_eq!(SpeechText::new("   \n"), Err(SpeechValidationError::EmptyText));
    }

    #[test]
    fn test_speech_text_length_ceiling_counts_chars() {
        let at_limit = "ż".repeat(MAX_TEXT_CHARS);
        assert!(SpeechText::new(at_limit).is_ok());

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(
            SpeechText::new(over),
            Err(SpeechValidationError::TextTooLong {
                len: MAX_TEXT_CHARS + 1,
                max: MAX_TEXT_CHARS
            })
        );
    }

    #[test]
    fn test_request_parse() {
        let request = TtsRequest::parse("Cześć", "pl", "female").unwrap();
        assert_eq!(request.text(), "Cześć");
        assert_eq!(request.text_length(), 5);
        assert_eq!(request.voice_gender(), VoiceGender::Female);
    }
}
