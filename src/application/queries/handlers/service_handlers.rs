//! Service Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::dispatcher::TtsDispatcher;
use crate::application::queries::{GetHealth, ListServices};
use crate::domain::service::{ServiceDescriptor, ServiceId};

// ============================================================================
// Response DTOs
// ============================================================================

/// 单个服务的配置状态
#[derive(Debug, Clone)]
pub struct ServiceHealth {
    pub service: ServiceId,
    pub configured: bool,
    pub endpoint: String,
}

/// 健康检查响应
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub timestamp: DateTime<Utc>,
    pub services: Vec<ServiceHealth>,
    pub development_mode: bool,
}

impl HealthReport {
    pub fn configured_services(&self) -> Vec<ServiceId> {
        self.services
            .iter()
            .filter(|s| s.configured)
            .map(|s| s.service)
            .collect()
    }
}

/// 服务目录条目
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub descriptor: &'static ServiceDescriptor,
    pub configured: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetHealth Handler
///
/// 只报告是否配置了凭证，不暴露凭证本身
pub struct GetHealthHandler {
    dispatcher: Arc<TtsDispatcher>,
    development_mode: bool,
}

impl GetHealthHandler {
    pub fn new(dispatcher: Arc<TtsDispatcher>, development_mode: bool) -> Self {
        Self {
            dispatcher,
            development_mode,
        }
    }

    pub fn handle(&self, _query: GetHealth) -> HealthReport {
        let services = self
            .dispatcher
            .engines()
            .map(|engine| ServiceHealth {
                service: engine.service(),
                configured: engine.is_configured(),
                endpoint: engine.endpoint(),
            })
            .collect();

        HealthReport {
            timestamp: Utc::now(),
            services,
            development_mode: self.development_mode,
        }
    }
}

/// ListServices Handler
pub struct ListServicesHandler {
    dispatcher: Arc<TtsDispatcher>,
}

impl ListServicesHandler {
    pub fn new(dispatcher: Arc<TtsDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn handle(&self, _query: ListServices) -> Vec<ServiceInfo> {
        self.dispatcher
            .engines()
            .map(|engine| ServiceInfo {
                descriptor: engine.service().descriptor(),
                configured: engine.is_configured(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{TtsEnginePort, TtsError};
    use crate::domain::speech::{TtsRequest, TtsResponse};
    use async_trait::async_trait;

    struct FixedEngine(ServiceId, bool);

    #[async_trait]
    impl TtsEnginePort for FixedEngine {
        fn service(&self) -> ServiceId {
            self.0
        }

        fn is_configured(&self) -> bool {
            self.1
        }

        fn endpoint(&self) -> String {
            format!("https://{}.example.com", self.0)
        }

        async fn synthesize(&self, _request: &TtsRequest) -> Result<TtsResponse, TtsError> {
            Err(TtsError::protocol("unused"))
        }
    }

    fn dispatcher() -> Arc<TtsDispatcher> {
        Arc::new(
            TtsDispatcher::new()
                .register(Arc::new(FixedEngine(ServiceId::Hume, false)))
                .register(Arc::new(FixedEngine(ServiceId::Papla, true))),
        )
    }

    #[test]
    fn test_health_reports_configured_services() {
        let handler = GetHealthHandler::new(dispatcher(), true);
        let report = handler.handle(GetHealth);

        assert!(report.development_mode);
        assert_eq!(report.services.len(), 2);
        assert_eq!(report.services[0].service, ServiceId::Papla);
        assert_eq!(report.configured_services(), vec![ServiceId::Papla]);
    }

    #[test]
    fn test_list_services_uses_catalog_descriptors() {
        let handler = ListServicesHandler::new(dispatcher());
        let services = handler.handle(ListServices);

        assert_eq!(services[1].descriptor.display_name, "Hume AI");
        assert!(!services[1].configured);
    }
}
