use crate::error::{AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PDF 处理服务地址
    pub service_base_url: String,
    /// 单次远程调用的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 结果文件输出目录
    pub output_dir: String,
    /// 是否为每个结果创建按时间命名的子目录
    pub timestamp_subdir: bool,
    /// 任务清单（TOML）存放目录
    pub manifest_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 120,
            output_dir: "output_pdf".to_string(),
            timestamp_subdir: false,
            manifest_folder: "jobs".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

/// 配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "PDF_CONFIG_FILE";

impl Config {
    /// 加载配置：默认值 → `PDF_CONFIG_FILE` 指定的 TOML 文件 → 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖已有取值
    pub fn with_env_overrides(self) -> Self {
        Self {
            service_base_url: std::env::var("PDF_SERVICE_URL").unwrap_or(self.service_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(self.output_dir),
            timestamp_subdir: std::env::var("TIMESTAMP_SUBDIR").ok().and_then(|v| v.parse().ok()).unwrap_or(self.timestamp_subdir),
            manifest_folder: std::env::var("MANIFEST_FOLDER").unwrap_or(self.manifest_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }

    /// 从 TOML 文件加载配置，缺省的键使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FileError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.service_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "service_base_url".to_string(),
                reason: format!("'{}' 缺少 http:// 或 https:// 前缀", url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "超时时间必须大于 0".to_string(),
            });
        }
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output_dir".to_string(),
                reason: "输出目录不能为空".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
