//! 核心功能模块
//!
//! 提供加载管线的基础设施：日志系统、配置管理和错误处理。
//! 这些模块与具体的几何格式无关。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 tracing
//! - `config`：配置管理，从 config.toml 加载
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use error::{DistObjError, ObjParseError, Result};
