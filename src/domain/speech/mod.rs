//! Speech Context
//!
//! 请求校验、合成结果与音频编码

mod audio;
mod errors;
mod synthesis;
mod value_objects;

pub use audio::{decode_data_uri, encode_data_uri, AudioPayload, MIME_MPEG, MIME_WAV};
pub use errors::{DataUriError, SpeechValidationError};
pub use synthesis::TtsResponse;
pub use value_objects::{LanguageCode, SpeechText, TtsRequest, VoiceGender, MAX_TEXT_CHARS};
