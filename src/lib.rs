//! TTS Matrix - 多厂商 TTS 对比服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 请求校验、音频载荷、合成结果
//! - Service: 厂商目录
//!
//! 应用层 (application/):
//! - Ports: TtsEnginePort
//! - Dispatcher: 按服务 ID 路由
//! - Commands: 单服务合成、多服务对比
//! - Queries: 健康检查、服务目录
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: ElevenLabs / Speechify / Papla / PlayAI / Hume / Demo
//! - HTTP: Client Proxy

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::{load_config, AppConfig};
