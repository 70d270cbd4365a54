//! 核心功能模块
//!
//! 本模块提供导出器的基础功能，包括数学库、日志系统、配置管理和错误处理。
//!
//! # 模块组织
//!
//! - `math`：数学库，基于 nalgebra 的向量、矩阵和颜色类型
//! - `log`：日志系统，基于 tracing 的订阅器初始化
//! - `config`：配置管理，支持从 TOML 文件加载导出选项
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use math::{Vector3, Vector4, Matrix4, Color};
pub use error::{Result, Md2Error, ConfigError, SceneError, MeshLoadError};
pub use config::{Config, ExportConfig, IndexPolicy, LogLevel, LoggingConfig};
