//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 厂商配置
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,

    /// 开发模式（仅在健康检查中报告）
    #[serde(default)]
    pub development_mode: bool,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置（前端页面）
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 所有 TTS 厂商配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// 出站 HTTP 请求超时（秒）
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    #[serde(default = "default_speechify")]
    pub speechify: VendorConfig,

    #[serde(default = "default_papla")]
    pub papla: VendorConfig,

    #[serde(default)]
    pub playai: PlayAiConfig,

    #[serde(default = "default_hume")]
    pub hume: VendorConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

fn default_http_timeout() -> u64 {
    60
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            elevenlabs: ElevenLabsConfig::default(),
            speechify: default_speechify(),
            papla: default_papla(),
            playai: PlayAiConfig::default(),
            hume: default_hume(),
            demo: DemoConfig::default(),
        }
    }
}

impl ProvidersConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

pub(crate) const SPEECHIFY_BASE_URL: &str = "https://api.sws.speechify.com";
pub(crate) const PAPLA_BASE_URL: &str = "https://api.papla.media";
pub(crate) const HUME_BASE_URL: &str = "https://api.hume.ai";
pub(crate) const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
pub(crate) const PLAYAI_BASE_URL: &str = "https://api.play.ai";

/// 通用厂商配置：凭证 + API 地址
#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    /// API Key（仅服务端持有）
    #[serde(default)]
    pub api_key: Option<String>,

    /// API 基础地址（测试时可指向本地桩服务）
    pub base_url: String,
}

impl VendorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// 有效凭证，空白字符串视为未配置
    pub fn credential(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }
}

fn default_speechify() -> VendorConfig {
    VendorConfig::new(SPEECHIFY_BASE_URL)
}

fn default_papla() -> VendorConfig {
    VendorConfig::new(PAPLA_BASE_URL)
}

fn default_hume() -> VendorConfig {
    VendorConfig::new(HUME_BASE_URL)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 合成模型
    #[serde(default = "default_elevenlabs_model")]
    pub model_id: String,

    /// 是否在合成前查询音色列表（失败时回退到静态音色表）
    #[serde(default)]
    pub voice_lookup: bool,
}

fn default_elevenlabs_url() -> String {
    ELEVENLABS_BASE_URL.to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_multilingual_v2".to_string()
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_url(),
            model_id: default_elevenlabs_model(),
            voice_lookup: false,
        }
    }
}

impl ElevenLabsConfig {
    pub fn credential(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }
}

/// PlayAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlayAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_playai_url")]
    pub base_url: String,

    /// `X-USER-ID` 请求头
    #[serde(default = "default_playai_user_id")]
    pub user_id: String,

    /// 任务轮询间隔（毫秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// 最大轮询次数
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

fn default_playai_url() -> String {
    PLAYAI_BASE_URL.to_string()
}

fn default_playai_user_id() -> String {
    "matrix-tts-comparison".to_string()
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_max_poll_attempts() -> u32 {
    30
}

impl Default for PlayAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_playai_url(),
            user_id: default_playai_user_id(),
            poll_interval_ms: default_poll_interval(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

impl PlayAiConfig {
    pub fn credential(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// 本地演示引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// 是否注册 demo 服务
    #[serde(default = "default_demo_enabled")]
    pub enabled: bool,
}

fn default_demo_enabled() -> bool {
    true
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: default_demo_enabled(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
