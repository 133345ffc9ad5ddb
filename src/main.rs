//! TTS Matrix - 多厂商 TTS 对比服务
//!
//! 启动流程：加载配置 → 初始化日志 → 构建调度器 → 启动 HTTP 服务

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tts_matrix::application::TtsEnginePort;
use tts_matrix::config::{load_config, print_config};
use tts_matrix::domain::service::ServiceId;
use tts_matrix::infrastructure::build_dispatcher;
use tts_matrix::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：厂商环境变量 > TTSMATRIX_ 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},tts_matrix={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("TTS Matrix - 多厂商 TTS 对比服务");
    print_config(&config);

    // 创建调度器（注册全部厂商适配器）
    let dispatcher = Arc::new(build_dispatcher(&config.providers)?);
    let configured: Vec<_> = dispatcher
        .engines()
        .filter(|engine| engine.service() != ServiceId::Demo && engine.is_configured())
        .map(|engine| engine.service().as_str())
        .collect();
    if configured.is_empty() {
        tracing::warn!("No vendor credentials configured");
    } else {
        tracing::info!(services = ?configured, "Configured TTS services");
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::from(&config.server);
    let state = AppState::new(dispatcher, config.development_mode);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
