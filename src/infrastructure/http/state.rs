//! Application State
//!
//! 所有 Command/Query Handlers 共享同一个调度器

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CompareHandler, SynthesizeHandler,
    // Query handlers
    GetHealthHandler, ListServicesHandler,
    TtsDispatcher,
};

/// 应用状态
pub struct AppState {
    pub dispatcher: Arc<TtsDispatcher>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeHandler,
    pub compare_handler: CompareHandler,

    // ========== Query Handlers ==========
    pub health_handler: GetHealthHandler,
    pub list_services_handler: ListServicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(dispatcher: Arc<TtsDispatcher>, development_mode: bool) -> Self {
        Self {
            dispatcher: dispatcher.clone(),

            synthesize_handler: SynthesizeHandler::new(dispatcher.clone()),
            compare_handler: CompareHandler::new(dispatcher.clone()),

            health_handler: GetHealthHandler::new(dispatcher.clone(), development_mode),
            list_services_handler: ListServicesHandler::new(dispatcher),
        }
    }
}
