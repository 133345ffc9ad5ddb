//! Domain Layer - 领域层
//!
//! - Speech Context: 合成请求、音频载荷、合成结果
//! - Service: 厂商目录

pub mod service;
pub mod speech;
