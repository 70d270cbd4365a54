//! 配置管理模块
//!
//! 提供导出器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (md2_export.toml)
//!
//! ```toml
//! [export]
//! index_policy = "legacy"   # 或 "strict"
//! deduplicate = false
//!
//! [logging]
//! level = "info"            # trace, debug, info, warn, error
//! file_output = false
//! log_file = "md2_export.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 导出器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 导出配置
///
/// 直接作为 [`crate::export::Md2Exporter`] 的选项使用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 缺失法线/UV 时面顶点索引的记录方式
    #[serde(default = "default_index_policy")]
    pub index_policy: IndexPolicy,

    /// 展平后是否合并完全相同的池条目
    #[serde(default = "default_deduplicate")]
    pub deduplicate: bool,
}

/// 面顶点索引策略
///
/// 网格没有法线（或 UV）时，`Legacy` 仍记录对应池的当前长度，
/// 结果可能指向前一个网格的条目；`Strict` 记录 0 表示缺失。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// 与历史输出保持字节级兼容
    Legacy,
    /// 缺失的属性记为 0
    Strict,
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
fn default_index_policy() -> IndexPolicy { IndexPolicy::Legacy }
fn default_deduplicate() -> bool { false }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "md2_export.log".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            index_policy: default_index_policy(),
            deduplicate: default_deduplicate(),
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

impl Config {
    /// 从配置文件加载
    ///
    /// ```no_run
    /// use md2_export::core::Config;
    ///
    /// let config = Config::from_file("md2_export.toml")?;
    /// # Ok::<(), md2_export::core::Md2Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
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
    /// - `--strict`: 使用 `IndexPolicy::Strict`
    /// - `--legacy`: 使用 `IndexPolicy::Legacy`
    /// - `--dedup`: 开启池去重
    /// - `--log-level <value>`: 设置日志级别
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--strict") {
            self.export.index_policy = IndexPolicy::Strict;
        }

        if args.iter().any(|a| a == "--legacy") {
            self.export.index_policy = IndexPolicy::Legacy;
        }

        if args.iter().any(|a| a == "--dedup") {
            self.export.deduplicate = true;
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|s| LogLevel::parse(s)) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }.into());
        }

        Ok(())
    }
}

impl LogLevel {
    /// 解析日志级别名称（不区分大小写）
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// 对应的 `EnvFilter` 指令
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
