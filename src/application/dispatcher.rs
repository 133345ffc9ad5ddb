//! TTS Dispatcher - 服务路由
//!
//! 按服务 ID 选择适配器并原样返回其结果，不做重试，不额外包超时

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::application::ports::{TtsEnginePort, TtsError};
use crate::domain::service::{ServiceId, UnknownServiceId};
use crate::domain::speech::{TtsRequest, TtsResponse};

/// 调度错误
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown TTS service: {0}")]
    UnknownService(String),

    #[error("{}: {source}", .service.display_name())]
    Service {
        service: ServiceId,
        #[source]
        source: TtsError,
    },
}

impl From<UnknownServiceId> for DispatchError {
    fn from(e: UnknownServiceId) -> Self {
        DispatchError::UnknownService(e.0)
    }
}

/// TTS 调度器
///
/// 静态映射：服务 ID → 适配器，启动时构建后只读
#[derive(Clone, Default)]
pub struct TtsDispatcher {
    engines: HashMap<ServiceId, Arc<dyn TtsEnginePort>>,
}

impl TtsDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册适配器（同一服务重复注册时后者覆盖前者）
    pub fn register(mut self, engine: Arc<dyn TtsEnginePort>) -> Self {
        self.engines.insert(engine.service(), engine);
        self
    }

    pub fn engine(&self, service: ServiceId) -> Option<&Arc<dyn TtsEnginePort>> {
        self.engines.get(&service)
    }

    /// 已注册的适配器，按服务目录顺序
    pub fn engines(&self) -> impl Iterator<Item = &Arc<dyn TtsEnginePort>> {
        ServiceId::ALL
            .iter()
            .filter_map(move |id| self.engines.get(id))
    }

    /// 解析服务 ID，未注册的服务同样视为未知
    pub fn resolve(&self, service_id: &str) -> Result<ServiceId, DispatchError> {
        let service: ServiceId = service_id.parse()?;
        if !self.engines.contains_key(&service) {
            return Err(DispatchError::UnknownService(service_id.to_string()));
        }
        Ok(service)
    }

    /// 路由到对应适配器
    pub async fn route(
        &self,
        service_id: &str,
        request: &TtsRequest,
    ) -> Result<TtsResponse, DispatchError> {
        let service = self.resolve(service_id)?;
        self.route_to(service, request).await
    }

    pub async fn route_to(
        &self,
        service: ServiceId,
        request: &TtsRequest,
    ) -> Result<TtsResponse, DispatchError> {
        let engine = self
            .engines
            .get(&service)
            .ok_or_else(|| DispatchError::UnknownService(service.to_string()))?;

        tracing::info!(
            service = %service,
            text_len = request.text_length(),
            language = %request.language(),
            voice_gender = %request.voice_gender(),
            "Generating TTS audio"
        );

        let started = Instant::now();
        match engine.synthesize(request).await {
            Ok(response) => {
                tracing::info!(
                    service = %service,
                    audio_size = response.audio_size,
                    generation_time_ms = response.generation_time_ms,
                    "TTS synthesis completed"
                );
                Ok(response)
            }
            Err(source) => {
                tracing::warn!(
                    service = %service,
                    kind = source.kind(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %source,
                    "TTS synthesis failed"
                );
                Err(DispatchError::Service { service, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::AudioPayload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingEngine {
        service: ServiceId,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingEngine {
        fn new(service: ServiceId, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                service,
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl TtsEnginePort for CountingEngine {
        fn service(&self) -> ServiceId {
            self.service
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn endpoint(&self) -> String {
            "internal".to_string()
        }

        async fn synthesize(&self, request: &TtsRequest) -> Result<TtsResponse, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TtsError::UpstreamHttp {
                    status: 401,
                    body: "invalid key".to_string(),
                });
            }
            let audio = AudioPayload::mpeg(vec![1u8; 32]);
            Ok(TtsResponse::from_audio(&audio, request, Duration::ZERO))
        }
    }

    fn request() -> TtsRequest {
        TtsRequest::parse("Hello", "en", "male").unwrap()
    }

    #[tokio::test]
    async fn test_unknown_service_invokes_nothing() {
        let engine = CountingEngine::new(ServiceId::Speechify, false);
        let dispatcher = TtsDispatcher::new().register(engine.clone());

        let err = dispatcher.route("polly", &request()).await.unwrap_err();

        assert!(matches!(&err, DispatchError::UnknownService(id) if id == "polly"));
        assert_eq!(err.to_string(), "Unknown TTS service: polly");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_known_but_unregistered_service_is_unknown() {
        let dispatcher =
            TtsDispatcher::new().register(CountingEngine::new(ServiceId::Speechify, false));

        let err = dispatcher.route("hume", &request()).await.unwrap_err();
        assert!(matches!(err, DispatchError::UnknownService(id) if id == "hume"));
    }

    #[tokio::test]
    async fn test_routes_to_matching_engine() {
        let speechify = CountingEngine::new(ServiceId::Speechify, false);
        let hume = CountingEngine::new(ServiceId::Hume, false);
        let dispatcher = TtsDispatcher::new()
            .register(speechify.clone())
            .register(hume.clone());

        let response = dispatcher.route("hume", &request()).await.unwrap();

        assert_eq!(response.audio_size, 32);
        assert_eq!(response.text_length, 5);
        assert_eq!(hume.calls.load(Ordering::SeqCst), 1);
        assert_eq!(speechify.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_is_prefixed_with_display_name() {
        let dispatcher =
            TtsDispatcher::new().register(CountingEngine::new(ServiceId::PlayAi, true));

        let err = dispatcher.route("playai", &request()).await.unwrap_err();

        assert_eq!(err.to_string(), "PlayAI TTS: HTTP 401: invalid key");
        assert!(matches!(
            err,
            DispatchError::Service {
                service: ServiceId::PlayAi,
                source: TtsError::UpstreamHttp { status: 401, .. }
            }
        ));
    }

    #[test]
    fn test_engines_in_catalog_order() {
        let dispatcher = TtsDispatcher::new()
            .register(CountingEngine::new(ServiceId::Demo, false))
            .register(CountingEngine::new(ServiceId::ElevenLabs, false));

        let order: Vec<ServiceId> = dispatcher.engines().map(|e| e.service()).collect();
        assert_eq!(order, vec![ServiceId::ElevenLabs, ServiceId::Demo]);
    }
}
