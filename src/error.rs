use crate::models::OperationKind;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 提交相关错误
    #[error("提交错误: {0}")]
    Submit(#[from] SubmitError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 一次提交失败的原因
///
/// 三类错误严格区分：本地校验失败、网关被占用、远程操作失败。
#[derive(Debug, Error)]
pub enum SubmitError {
    /// 本地校验失败，远程层不会被调用
    #[error("校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 已有其他操作正在进行
    #[error("已有操作正在处理中，拒绝本次{kind}请求")]
    Busy { kind: OperationKind },
    /// 远程操作失败
    #[error(transparent)]
    Remote(#[from] RemoteOperationError),
}

impl SubmitError {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitError::Busy { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitError::Validation(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SubmitError::Remote(_))
    }
}

/// 本地校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 批次为空
    #[error("批次 {batch} 中没有文件")]
    EmptyBatch { batch: String },
    /// 批次不存在
    #[error("批次 {batch} 不存在")]
    UnknownBatch { batch: String },
    /// 批次类型与操作不匹配
    #[error("批次 {batch} 的类型不适用于{kind}操作")]
    BatchKindMismatch { batch: String, kind: OperationKind },
    /// 页码范围非法
    #[error("页码范围非法: 起始页 {start}, 结束页 {end} (要求 结束页 >= 起始页 >= 1)")]
    InvalidPageRange { start: i64, end: i64 },
}

/// 远程操作错误，附带操作类型
#[derive(Debug, Error)]
#[error("{kind}操作失败: {source}")]
pub struct RemoteOperationError {
    pub kind: OperationKind,
    #[source]
    pub source: RemoteError,
}

impl RemoteOperationError {
    pub fn new(kind: OperationKind, source: RemoteError) -> Self {
        Self { kind, source }
    }
}

/// 远程调用错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 请求超时
    #[error("请求超时 ({endpoint}), 超过 {secs} 秒")]
    Timeout { endpoint: String, secs: u64 },
    /// 服务返回非成功状态
    #[error("服务返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 服务返回空内容
    #[error("服务返回空内容: {endpoint}")]
    EmptyResponse { endpoint: String },
    /// 读取待上传文件失败
    #[error("读取待上传文件失败 ({name}): {source}")]
    Input {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 配置项取值非法
    #[error("配置项 {field} 非法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
