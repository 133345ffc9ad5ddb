//! Synthesize Command Handlers

use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;

use crate::application::commands::{
    CompareCommand, CompareResponse, ServiceOutcome, SynthesizeCommand,
};
use crate::application::dispatcher::TtsDispatcher;
use crate::application::error::ApplicationError;
use crate::domain::service::ServiceId;
use crate::domain::speech::{TtsRequest, TtsResponse};

// ============================================================================
// Synthesize
// ============================================================================

/// Synthesize Handler - 单服务合成
pub struct SynthesizeHandler {
    dispatcher: Arc<TtsDispatcher>,
}

impl SynthesizeHandler {
    pub fn new(dispatcher: Arc<TtsDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, cmd: SynthesizeCommand) -> Result<TtsResponse, ApplicationError> {
        let request = TtsRequest::parse(cmd.text, &cmd.language, &cmd.voice_gender)?;
        let response = self.dispatcher.route(&cmd.service, &request).await?;
        Ok(response)
    }
}

// ============================================================================
// Compare
// ============================================================================

/// Compare Handler - 多服务并发合成
///
/// 各服务独立执行，结果按完成先后收集，单个服务失败不影响其他服务
pub struct CompareHandler {
    dispatcher: Arc<TtsDispatcher>,
}

impl CompareHandler {
    pub fn new(dispatcher: Arc<TtsDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, cmd: CompareCommand) -> Result<CompareResponse, ApplicationError> {
        let request = TtsRequest::parse(cmd.text, &cmd.language, &cmd.voice_gender)?;
        let services = self.resolve_services(cmd.services)?;

        tracing::info!(
            services = ?services,
            text_len = request.text_length(),
            "Comparing TTS services"
        );

        let request = &request;
        let mut pending: FuturesUnordered<_> = services
            .into_iter()
            .map(|service| async move {
                let result = self.dispatcher.route_to(service, request).await;
                ServiceOutcome { service, result }
            })
            .collect();

        let mut results = Vec::new();
        while let Some(outcome) = pending.next().await {
            results.push(outcome);
        }

        Ok(CompareResponse { results })
    }

    /// 校验并去重服务列表，任何未知 ID 都会在发起请求前被拒绝
    fn resolve_services(
        &self,
        requested: Option<Vec<String>>,
    ) -> Result<Vec<ServiceId>, ApplicationError> {
        let Some(requested) = requested else {
            return Ok(self.dispatcher.engines().map(|e| e.service()).collect());
        };

        if requested.is_empty() {
            return Err(ApplicationError::validation("services must not be empty"));
        }

        let mut services = Vec::with_capacity(requested.len());
        for id in &requested {
            let service = self.dispatcher.resolve(id)?;
            if !services.contains(&service) {
                services.push(service);
            }
        }
        Ok(services)
    }
}
