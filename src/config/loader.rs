//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 厂商约定环境变量（`ELEVENLABS_API_KEY` 等）
//! 2. 前缀环境变量（`TTSMATRIX_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值
//!
//! 配置只在启动时读取一次，之后以 `AppConfig` 注入各适配器

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{
    AppConfig, ELEVENLABS_BASE_URL, HUME_BASE_URL, PAPLA_BASE_URL, PLAYAI_BASE_URL,
    SPEECHIFY_BASE_URL,
};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 厂商约定的凭证环境变量 → 配置键
const VENDOR_ENV_KEYS: &[(&str, &str)] = &[
    ("ELEVENLABS_API_KEY", "providers.elevenlabs.api_key"),
    ("SPEECHIFY_API_KEY", "providers.speechify.api_key"),
    ("PAPLA_API_KEY", "providers.papla.api_key"),
    ("PLAYAI_API_KEY", "providers.playai.api_key"),
    ("HUME_API_KEY", "providers.hume.api_key"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `TTSMATRIX_SERVER__PORT=8080`
/// - `TTSMATRIX_PROVIDERS__PLAYAI__MAX_POLL_ATTEMPTS=10`
/// - `ELEVENLABS_API_KEY=...`
/// - `DEVELOPMENT_MODE=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with(config_path, |name| std::env::var(name).ok())
}

fn load_config_with<F>(config_path: Option<&Path>, env_lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.static_files.enabled", false)?
        .set_default("server.static_files.dir", "web")?
        .set_default("providers.http_timeout_secs", 60)?
        .set_default("providers.elevenlabs.base_url", ELEVENLABS_BASE_URL)?
        .set_default("providers.elevenlabs.model_id", "eleven_multilingual_v2")?
        .set_default("providers.elevenlabs.voice_lookup", false)?
        .set_default("providers.speechify.base_url", SPEECHIFY_BASE_URL)?
        .set_default("providers.papla.base_url", PAPLA_BASE_URL)?
        .set_default("providers.playai.base_url", PLAYAI_BASE_URL)?
        .set_default("providers.playai.user_id", "matrix-tts-comparison")?
        .set_default("providers.playai.poll_interval_ms", 1000)?
        .set_default("providers.playai.max_poll_attempts", 30)?
        .set_default("providers.hume.base_url", HUME_BASE_URL)?
        .set_default("providers.demo.enabled", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?
        .set_default("development_mode", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量
    // 例如: TTSMATRIX_PROVIDERS__HUME__BASE_URL=http://localhost:9000
    builder = builder.add_source(
        Environment::with_prefix("TTSMATRIX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 厂商约定环境变量（最高优先级）
    for (key, value) in vendor_env_overrides(&env_lookup) {
        builder = builder.set_override(key, value)?;
    }
    if let Some(flag) = env_lookup("DEVELOPMENT_MODE") {
        builder = builder.set_override("development_mode", flag.trim() == "true")?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 收集非空的厂商凭证环境变量
fn vendor_env_overrides<F>(env_lookup: &F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    VENDOR_ENV_KEYS
        .iter()
        .filter_map(|(var, key)| {
            env_lookup(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
        .collect()
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let providers = &config.providers;
    if providers.http_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "HTTP timeout cannot be 0".to_string(),
        ));
    }

    let base_urls = [
        ("elevenlabs", &providers.elevenlabs.base_url),
        ("speechify", &providers.speechify.base_url),
        ("papla", &providers.papla.base_url),
        ("playai", &providers.playai.base_url),
        ("hume", &providers.hume.base_url),
    ];
    for (name, url) in base_urls {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} base URL cannot be empty",
                name
            )));
        }
    }

    if providers.playai.max_poll_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "PlayAI max poll attempts cannot be 0".to_string(),
        ));
    }

    if providers.playai.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "PlayAI poll interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不输出凭证）
pub fn print_config(config: &AppConfig) {
    let providers = &config.providers;
    let configured = |key: Option<&str>| if key.is_some() { "configured" } else { "missing" };

    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("HTTP Timeout: {}s", providers.http_timeout_secs);
    tracing::info!(
        "ElevenLabs: {} ({})",
        configured(providers.elevenlabs.credential()),
        providers.elevenlabs.base_url
    );
    tracing::info!(
        "Speechify: {} ({})",
        configured(providers.speechify.credential()),
        providers.speechify.base_url
    );
    tracing::info!(
        "Papla: {} ({})",
        configured(providers.papla.credential()),
        providers.papla.base_url
    );
    tracing::info!(
        "PlayAI: {} ({}, {} polls x {}ms)",
        configured(providers.playai.credential()),
        providers.playai.base_url,
        providers.playai.max_poll_attempts,
        providers.playai.poll_interval_ms
    );
    tracing::info!(
        "Hume: {} ({})",
        configured(providers.hume.credential()),
        providers.hume.base_url
    );
    tracing::info!("Demo Enabled: {}", providers.demo.enabled);
    tracing::info!("Development Mode: {}", config.development_mode);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
