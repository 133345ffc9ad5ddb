//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：健康检查与服务目录

mod service_queries;

pub mod handlers;

pub use service_queries::*;
