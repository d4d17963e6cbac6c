//! 错误处理模块
//!
//! 定义了加载管线中使用的统一错误类型。
//!
//! # 错误分类
//!
//! - `ObjParseError`：OBJ 文本解析错误（流读取失败、语法错误、索引错误）
//! - `ConfigError`：配置文件与回调配置错误
//! - `MeshLoadError`：模型加载错误（文件、格式、解析、校验）
//! - `DistObjError`：顶层错误，汇总以上所有类型
//!
//! 语法错误和索引错误都携带从 1 开始的源文件行号。

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, DistObjError>;

/// 顶层错误类型
#[derive(Debug)]
pub enum DistObjError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置项缺失
    MissingField(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// OBJ 解析失败
    Parse(ObjParseError),

    /// 数据验证失败
    ValidationError(String),
}

/// 属性集合种类，用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl Attribute {
    /// 对应的 OBJ 元素关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Attribute::Position => "v",
            Attribute::Texcoord => "vt",
            Attribute::Normal => "vn",
        }
    }
}

/// OBJ 解析错误
///
/// 任何 `Syntax` 或 `Index` 错误都会立即中止当前解析调用，不返回部分结果。
#[derive(Debug)]
pub enum ObjParseError {
    /// 底层流读取失败，原样传播
    Stream(std::io::Error),

    /// 语法错误
    Syntax { line: usize, kind: SyntaxError },

    /// 索引错误
    Index { line: usize, kind: IndexError },
}

/// 语法错误的具体种类
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// `v`/`vt`/`vn`/`f` 的字段数量不对
    FieldCount {
        element: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// 面顶点的 `/` 分量超过 3 个
    TooManyIndexFields { vertex: usize, found: usize },

    /// 面内顶点的分量数与第一个顶点不一致
    ArityMismatch {
        vertex: usize,
        expected: usize,
        found: usize,
    },

    /// 面内顶点的纹理索引省略情况（`p//n`）不一致
    TexcoordElisionMismatch { vertex: usize },

    /// 浮点字段无法解析
    InvalidNumber { field: String, reason: String },

    /// 索引字段无法解析
    InvalidIndex {
        vertex: usize,
        field: String,
        reason: String,
    },
}

/// 索引错误的具体种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// 索引为 0
    Zero { attribute: Attribute, vertex: usize },

    /// 解析后的索引超出当前集合范围
    OutOfRange {
        attribute: Attribute,
        vertex: usize,
        raw: i32,
        len: usize,
    },
}

impl ObjParseError {
    /// 出错的源文件行号（从 1 开始），流错误没有行号
    pub fn line(&self) -> Option<usize> {
        match self {
            ObjParseError::Stream(_) => None,
            ObjParseError::Syntax { line, .. } | ObjParseError::Index { line, .. } => Some(*line),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ObjParseError::Syntax { .. })
    }

    pub fn is_index(&self) -> bool {
        matches!(self, ObjParseError::Index { .. })
    }
}

impl fmt::Display for DistObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistObjError::Config(e) => write!(f, "Configuration error: {}", e),
            DistObjError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            DistObjError::Io(e) => write!(f, "IO error: {}", e),
            DistObjError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::Parse(e) => write!(f, "Failed to parse mesh: {}", e),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl fmt::Display for ObjParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjParseError::Stream(e) => write!(f, "stream read failed: {}", e),
            ObjParseError::Syntax { line, kind } => write!(f, "{}: syntax error: {}", line, kind),
            ObjParseError::Index { line, kind } => write!(f, "{}: index error: {}", line, kind),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::FieldCount { element, expected, found } => {
                write!(f, "{} requires {} values, found {}", element, expected, found)
            }
            SyntaxError::TooManyIndexFields { vertex, found } => write!(
                f,
                "vertex {}: vertices cannot have more than three attributes, found {}",
                vertex, found
            ),
            SyntaxError::ArityMismatch { vertex, expected, found } => write!(
                f,
                "vertex {}: all vertices must have the same number of attributes (expected {}, found {})",
                vertex, expected, found
            ),
            SyntaxError::TexcoordElisionMismatch { vertex } => write!(
                f,
                "vertex {}: all texture indices must be present or elided",
                vertex
            ),
            SyntaxError::InvalidNumber { field, reason } => {
                write!(f, "invalid number \"{}\": {}", field, reason)
            }
            SyntaxError::InvalidIndex { vertex, field, reason } => {
                write!(f, "vertex {}: invalid index \"{}\": {}", vertex, field, reason)
            }
        }
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Zero { attribute, vertex } => write!(
                f,
                "vertex {}: {}-index 0 is not a valid index",
                vertex,
                attribute.keyword()
            ),
            IndexError::OutOfRange { attribute, vertex, raw, len } => write!(
                f,
                "vertex {}: {}-index {} does not resolve to an attribute ({} declared so far)",
                vertex,
                attribute.keyword(),
                raw,
                len
            ),
        }
    }
}

impl std::error::Error for DistObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistObjError::Io(e) => Some(e),
            DistObjError::MeshLoading(e) => Some(e),
            DistObjError::Config(e) => Some(e),
            DistObjError::Log(_) => None,
        }
    }
}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshLoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ObjParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjParseError::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for DistObjError {
    fn from(err: std::io::Error) -> Self {
        DistObjError::Io(err)
    }
}

impl From<ConfigError> for DistObjError {
    fn from(err: ConfigError) -> Self {
        DistObjError::Config(err)
    }
}

impl From<MeshLoadError> for DistObjError {
    fn from(err: MeshLoadError) -> Self {
        DistObjError::MeshLoading(err)
    }
}

impl From<ObjParseError> for MeshLoadError {
    fn from(err: ObjParseError) -> Self {
        MeshLoadError::Parse(err)
    }
}

impl From<ObjParseError> for DistObjError {
    fn from(err: ObjParseError) -> Self {
        DistObjError::MeshLoading(MeshLoadError::Parse(err))
    }
}
