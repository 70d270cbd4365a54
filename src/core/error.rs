//! 错误处理模块
//!
//! 定义了导出器中使用的统一错误类型。
//!
//! # 错误分类
//!
//! - `Config`：配置文件读取或校验失败
//! - `Scene`：场景数据不满足导出前提（无网格、层级引用越界等）
//! - `MeshLoading`：场景提供者（OBJ 加载器等）加载失败
//! - `Io`：输出目标无法打开或写入，直接上抛，不做重试
//!
//! 不支持或缺失的材质属性不是错误，序列化时直接跳过。

use std::fmt;
use std::path::PathBuf;

/// 导出器统一的 Result 类型
pub type Result<T> = std::result::Result<T, Md2Error>;

/// 导出器的错误类型
#[derive(Debug)]
pub enum Md2Error {
    /// 配置错误
    Config(ConfigError),

    /// 场景数据错误
    Scene(SceneError),

    /// 场景加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 场景数据相关的错误
///
/// 所有变体都会立即中止导出，不存在部分成功的输出。
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// 场景中没有任何网格，无法读取第一个网格来构造文件头
    MissingGeometry,

    /// 节点层级引用了不存在的网格
    InvalidHierarchy(String),

    /// 网格内部数据不一致（面索引越界、属性数组长度不匹配）
    InvalidGeometry(String),

    /// 网格引用了不存在的材质
    InvalidMaterial(String),
}

/// 场景加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),

    /// 几何数据无效
    InvalidGeometry(String),
}

impl fmt::Display for Md2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Md2Error::Config(e) => write!(f, "Configuration error: {}", e),
            Md2Error::Scene(e) => write!(f, "Scene error: {}", e),
            Md2Error::MeshLoading(e) => write!(f, "Scene loading error: {}", e),
            Md2Error::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::MissingGeometry => write!(f, "Scene contains no geometry"),
            SceneError::InvalidHierarchy(msg) => write!(f, "Invalid node hierarchy: {}", msg),
            SceneError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
            SceneError::InvalidMaterial(msg) => write!(f, "Invalid material reference: {}", msg),
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Scene file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported scene format: {}", msg),
            MeshLoadError::ParseError(msg) => write!(f, "Failed to parse scene: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl std::error::Error for Md2Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Md2Error::Io(e) => Some(e),
            Md2Error::Config(e) => Some(e),
            Md2Error::Scene(e) => Some(e),
            Md2Error::MeshLoading(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for SceneError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for Md2Error {
    fn from(err: std::io::Error) -> Self {
        Md2Error::Io(err)
    }
}

impl From<ConfigError> for Md2Error {
    fn from(err: ConfigError) -> Self {
        Md2Error::Config(err)
    }
}

impl From<SceneError> for Md2Error {
    fn from(err: SceneError) -> Self {
        Md2Error::Scene(err)
    }
}

impl From<MeshLoadError> for Md2Error {
    fn from(err: MeshLoadError) -> Self {
        Md2Error::MeshLoading(err)
    }
}
