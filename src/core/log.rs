//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 解析器本身只产生 tracing 事件（不支持的元素、解析统计、重载失败），
//! 是否输出以及输出到哪里由这里的订阅者决定。
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_obj::core::log;
//! use dist_obj::core::config::LogLevel;
//!
//! log::init_logger(LogLevel::Info, false, None).expect("logger");
//! tracing::info!(vertices = 3, "Mesh loaded");
//! ```

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use std::path::Path;

use super::config::LogLevel;
use super::error::{DistObjError, Result};

/// 初始化日志系统
///
/// 在程序开始时调用一次。重复初始化返回 `DistObjError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别（`RUST_LOG` 环境变量存在时优先）
/// * `file_output` - 是否同时输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "dist_obj.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(true);

    let result = if file_output {
        let log_path = log_file_path.unwrap_or("dist_obj.log");
        let path = Path::new(log_path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("dist_obj.log");

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
    };

    result.map_err(|e| DistObjError::Log(e.to_string()))
}

/// 引擎核心日志 - Info 级别
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "dist_obj::engine", $($arg)*)
    };
}

/// 引擎核心日志 - Warn 级别
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "dist_obj::engine", $($arg)*)
    };
}

/// 引擎核心日志 - Error 级别
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "dist_obj::engine", $($arg)*)
    };
}

impl LogLevel {
    /// EnvFilter 使用的指令字符串
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
