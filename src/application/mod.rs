//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine）
//! - dispatcher: 服务 ID → 适配器路由
//! - commands: 合成 / 对比命令及处理器
//! - queries: 健康检查 / 服务目录查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{CompareHandler, SynthesizeHandler},
    CompareCommand, CompareResponse, ServiceOutcome, SynthesizeCommand,
};
pub use dispatcher::{DispatchError, TtsDispatcher};
pub use error::ApplicationError;
pub use ports::{TtsEnginePort, TtsError};
pub use queries::{
    handlers::{
        GetHealthHandler, HealthReport, ListServicesHandler, ServiceHealth, ServiceInfo,
    },
    GetHealth, ListServices,
};
