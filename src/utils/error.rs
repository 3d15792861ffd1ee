use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序统一错误类型
/// 用于封装系统中可能出现的各种错误，提供统一的错误处理机制
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    /// 通用错误，包含错误消息
    #[error("通用错误: {message}")]
    Generic { message: String },

    /// 输入/输出错误
    #[error("IO错误: {message} (Kind: {kind})")]
    IoError { message: String, kind: String },

    /// JSON序列化/反序列化错误
    #[error("JSON序列化/反序列化错误: {message}")]
    JsonError { message: String },

    /// 配置相关错误
    #[error("配置错误: {message}")]
    ConfigurationError { message: String },

    /// 验证错误（数据验证失败）
    #[error("验证错误: {message}")]
    ValidationError { message: String },

    /// 资源未找到错误
    ///
    /// **业务含义**: 请求的收发器ID不在目录中
    /// **处理方式**: 对应槽位的结果被清空并记录错误，不影响其他槽位
    #[error("资源未找到: {resource_type} - {message}")]
    NotFoundError {
        resource_type: String,
        message: String,
    },

    /// 数据获取失败
    ///
    /// **业务含义**: 收发器、测试类别、测试用例三类资源不可用
    /// **注意**: 测试结果资源的获取失败不会产生该错误，而是按"无结果"处理
    #[error("数据获取失败: {resource} - {message}")]
    FetchFailure { resource: String, message: String },

    /// 导出失败（文件打包或写出失败）
    #[error("导出失败: {message}")]
    ExportFailure { message: String },

    /// 没有可导出的结果
    #[error("没有可导出的测试结果，请先选择并比较收发器")]
    EmptyExport,

    /// Excel生成错误
    #[error("Excel生成错误: {message}")]
    ExcelError { message: String },
}

impl AppError {
    /// 创建通用错误
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// 创建IO错误
    pub fn io_error(message: impl Into<String>, kind_str: impl Into<String>) -> Self {
        Self::IoError {
            message: message.into(),
            kind: kind_str.into(),
        }
    }

    /// 创建JSON序列化错误
    pub fn json_error(message: impl Into<String>) -> Self {
        Self::JsonError {
            message: message.into(),
        }
    }

    /// 创建配置错误
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// 创建资源未找到错误
    pub fn not_found_error(resource_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFoundError {
            resource_type: resource_type.into(),
            message: message.into(),
        }
    }

    /// 创建数据获取失败错误
    ///
    /// **参数**: `resource` - 资源名称（如 `transceivers.json`），`message` - 失败原因
    pub fn fetch_failure(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailure {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// 创建导出失败错误
    pub fn export_failure(message: impl Into<String>) -> Self {
        Self::ExportFailure {
            message: message.into(),
        }
    }

    /// 是否为资源未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFoundError { .. })
    }

    /// 获取错误的简短描述
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Generic { .. } => "GENERIC",
            AppError::IoError { .. } => "IO_ERROR",
            AppError::JsonError { .. } => "JSON_ERROR",
            AppError::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::NotFoundError { .. } => "NOT_FOUND_ERROR",
            AppError::FetchFailure { .. } => "FETCH_FAILURE",
            AppError::ExportFailure { .. } => "EXPORT_FAILURE",
            AppError::EmptyExport => "EMPTY_EXPORT",
            AppError::ExcelError { .. } => "EXCEL_ERROR",
        }
    }
}

/// 标准 I/O 错误到 AppError 的转换
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError { message: err.to_string(), kind: format!("{:?}", err.kind()) }
    }
}

/// serde_json 错误到 AppError 的转换
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError { message: err.to_string() }
    }
}

/// reqwest 错误到 AppError 的转换
///
/// 带URL的错误以URL作为资源名，便于定位是哪一个JSON资源失败
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let resource = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        AppError::FetchFailure { resource, message: err.to_string() }
    }
}

/// config 错误到 AppError 的转换
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigurationError { message: err.to_string() }
    }
}

/// rust_xlsxwriter 错误到 AppError 的转换
impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::ExcelError { message: format!("Excel error: {}", err) }
    }
}

/// 字符串错误到 AppError 的转换（通用错误）
impl From<String> for AppError {
    fn from(err_msg: String) -> Self {
        Self::Generic { message: err_msg }
    }
}

/// &str 错误到 AppError 的转换（通用错误）
impl From<&str> for AppError {
    fn from(err_msg: &str) -> Self {
        Self::Generic { message: err_msg.to_string() }
    }
}

/// 应用程序结果类型别名
/// 简化错误处理的类型定义
pub type AppResult<T> = Result<T, AppError>;
