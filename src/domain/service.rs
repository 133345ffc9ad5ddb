//! TTS 服务标识与静态描述

use serde::Serialize;
use std::str::FromStr;

/// 已知的 TTS 服务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    ElevenLabs,
    Speechify,
    Papla,
    PlayAi,
    Hume,
    Demo,
}

impl ServiceId {
    pub const ALL: [ServiceId; 6] = [
        ServiceId::ElevenLabs,
        ServiceId::Speechify,
        ServiceId::Papla,
        ServiceId::PlayAi,
        ServiceId::Hume,
        ServiceId::Demo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "elevenlabs",
            Self::Speechify => "speechify",
            Self::Papla => "papla",
            Self::PlayAi => "playai",
            Self::Hume => "hume",
            Self::Demo => "demo",
        }
    }

    pub fn descriptor(&self) -> &'static ServiceDescriptor {
        match self {
            Self::ElevenLabs => &SERVICES[0],
            Self::Speechify => &SERVICES[1],
            Self::Papla => &SERVICES[2],
            Self::PlayAi => &SERVICES[3],
            Self::Hume => &SERVICES[4],
            Self::Demo => &SERVICES[5],
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.descriptor().display_name
    }
}

/// 未知服务 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownServiceId(pub String);

impl FromStr for ServiceId {
    type Err = UnknownServiceId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownServiceId(s.to_string()))
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 服务描述（仅用于展示）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// 服务目录，顺序即展示顺序
pub static SERVICES: [ServiceDescriptor; 6] = [
    ServiceDescriptor {
        id: ServiceId::ElevenLabs,
        display_name: "ElevenLabs",
        description: "High-quality AI voices with emotional range",
    },
    ServiceDescriptor {
        id: ServiceId::Speechify,
        display_name: "Speechify",
        description: "Natural-sounding voices for accessibility",
    },
    ServiceDescriptor {
        id: ServiceId::Papla,
        display_name: "Papla AI",
        description: "Advanced neural text-to-speech",
    },
    ServiceDescriptor {
        id: ServiceId::PlayAi,
        display_name: "PlayAI TTS",
        description: "Real-time voice synthesis",
    },
    ServiceDescriptor {
        id: ServiceId::Hume,
        display_name: "Hume AI",
        description: "Emotionally intelligent speech synthesis",
    },
    ServiceDescriptor {
        id: ServiceId::Demo,
        display_name: "Demo TTS",
        description: "Fallback demo audio (no API key required)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        for id in ServiceId::ALL {
            assert_eq!(id.as_str().parse::<ServiceId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_unknown_id() {
        assert_eq!(
            "polly".parse::<ServiceId>(),
            Err(UnknownServiceId("polly".to_string()))
        );
        // 大小写敏感
        assert!("ElevenLabs".parse::<ServiceId>().is_err());
    }

    #[test]
    fn test_descriptor_matches_id() {
        for id in ServiceId::ALL {
            assert_eq!(id.descriptor().id, id);
        }
        assert_eq!(ServiceId::PlayAi.display_name(), "PlayAI TTS");
    }
}
