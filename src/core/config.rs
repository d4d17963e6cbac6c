//! 配置管理模块
//!
//! 提供加载管线配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [model]
//! path = "monkey.obj"
//!
//! [loader]
//! warn_unsupported = true   # 不支持的元素以 warn 级别输出（否则 debug）
//! keep_last_good = true     # 重载失败时保留上一次成功的网格
//!
//! [logging]
//! level = "info"            # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 顶层配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 加载器配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型文件路径
    #[serde(default = "default_model_path")]
    pub path: String,
}

/// 加载器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 不支持的元素是否以 warn 级别报告
    #[serde(default = "default_warn_unsupported")]
    pub warn_unsupported: bool,

    /// 重载失败时是否保留上一次成功的网格
    #[serde(default = "default_keep_last_good")]
    pub keep_last_good: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_model_path() -> String { "monkey.obj".to_string() }
fn default_warn_unsupported() -> bool { true }
fn default_keep_last_good() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "dist_obj.log".to_string() }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            warn_unsupported: default_warn_unsupported(),
            keep_last_good: default_keep_last_good(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl LogLevel {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Config {
    /// 从配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound(path_str).into());
            }
            Err(e) => return Err(e.into()),
        };

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--model <path>`: 模型文件路径
    /// - `--quiet-unsupported`: 不支持的元素只以 debug 级别报告
    /// - `--log-level <level>`: 日志级别
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--model") {
            if let Some(path) = args.get(idx + 1) {
                self.model.path = path.clone();
            }
        }

        if args.iter().any(|a| a == "--quiet-unsupported") {
            self.loader.warn_unsupported = false;
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|s| LogLevel::parse(s)) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置的有效性
    ///
    /// `supported_extensions` 为可用加载器的扩展名（小写，不含点号）。
    pub fn validate(&self, supported_extensions: &[&str]) -> Result<()> {
        if self.model.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model.path".to_string(),
                reason: "Model path must not be empty".to_string(),
            }
            .into());
        }

        let extension = Path::new(&self.model.path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        let supported = extension
            .map(|ext| supported_extensions.contains(&ext.as_str()))
            .unwrap_or(false);
        if !supported {
            return Err(ConfigError::InvalidValue {
                field: "model.path".to_string(),
                reason: format!("Unsupported model format: {}", self.model.path),
            }
            .into());
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
