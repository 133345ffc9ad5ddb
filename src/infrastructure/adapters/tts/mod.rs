//! TTS Adapters - 各厂商 HTTP 客户端实现

mod demo;
mod elevenlabs;
mod http_client;
mod hume;
mod papla;
mod playai;
mod speechify;

use std::sync::Arc;

pub use demo::DemoTtsEngine;
pub use elevenlabs::ElevenLabsClient;
pub use http_client::VendorHttpClient;
pub use hume::HumeClient;
pub use papla::PaplaClient;
pub use playai::PlayAiClient;
pub use speechify::SpeechifyClient;

use crate::application::dispatcher::TtsDispatcher;
use crate::application::ports::TtsError;
use crate::config::ProvidersConfig;

/// 根据配置构建调度器
///
/// 所有厂商都会注册，缺少凭证的厂商在调用时返回 `NotConfigured`
pub fn build_dispatcher(config: &ProvidersConfig) -> Result<TtsDispatcher, TtsError> {
    let http = VendorHttpClient::new(config.http_timeout())?;

    let mut dispatcher = TtsDispatcher::new()
        .register(Arc::new(ElevenLabsClient::new(
            http.clone(),
            config.elevenlabs.clone(),
        )))
        .register(Arc::new(SpeechifyClient::new(
            http.clone(),
            config.speechify.clone(),
        )))
        .register(Arc::new(PaplaClient::new(http.clone(), config.papla.clone())))
        .register(Arc::new(PlayAiClient::new(http.clone(), config.playai.clone())))
        .register(Arc::new(HumeClient::new(http, config.hume.clone())));

    if config.demo.enabled {
        dispatcher = dispatcher.register(Arc::new(DemoTtsEngine::new()));
    }

    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::ServiceId;

    #[test]
    fn test_build_dispatcher_registers_all_services() {
        let config = ProvidersConfig::default();
        let dispatcher = build_dispatcher(&config).unwrap();

        let services: Vec<ServiceId> = dispatcher.engines().map(|e| e.service()).collect();
        assert_eq!(services, ServiceId::ALL.to_vec());

        let configured: Vec<ServiceId> = dispatcher
            .engines()
            .filter(|e| e.is_configured())
            .map(|e| e.service())
            .collect();
        assert_eq!(configured, vec![ServiceId::Demo]);
    }

    #[test]
    fn test_demo_can_be_disabled() {
        let mut config = ProvidersConfig::default();
        config.demo.enabled = false;
        let dispatcher = build_dispatcher(&config).unwrap();

        assert!(dispatcher.engine(ServiceId::Demo).is_none());
        assert!(dispatcher.resolve("demo").is_err());
    }
}
