//! Service Queries - 服务状态查询

/// 健康检查查询
#[derive(Debug, Clone)]
pub struct GetHealth;

/// 列出所有服务查询
#[derive(Debug, Clone)]
pub struct ListServices;
