//! # 日志记录模块 (Logging Module)
//!
//! ## 业务说明
//! 记录数据获取、报告组装和导出过程，为故障排查提供日志支持
//!
//! ## 日志功能
//! - **级别控制**: 由 `LoggingConfig::log_level` 决定，`RUST_LOG` 可以进一步覆盖
//! - **输出目标**: 默认输出到控制台，配置了 `log_file_path` 时写入文件
//! - **统一格式**: `[时间] [级别] 消息`
//!
//! ## Rust知识点
//! - **日志宏**: 使用log crate的宏系统
//! - **环境配置**: 通过env_logger进行环境变量配置

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Once;

use chrono::Local;

use crate::utils::config::LoggingConfig;
use crate::utils::error::{AppError, AppResult};

static LOGGER_INIT: Once = Once::new();

/// 初始化全局日志
///
/// 重复调用是无操作，测试中可以放心多次调用
pub fn init_logger(config: &LoggingConfig) -> AppResult<()> {
    let mut result = Ok(());

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&config.log_level)
            .parse_env("RUST_LOG")
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            });

        if let Some(path) = &config.log_file_path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        result = Err(AppError::io_error(format!("创建日志目录失败: {}", e), e.kind().to_string()));
                        return;
                    }
                }
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => {
                    result = Err(AppError::io_error(format!("打开日志文件失败: {}", e), e.kind().to_string()));
                    return;
                }
            }
        }

        if let Err(e) = builder.try_init() {
            result = Err(AppError::generic(format!("日志系统初始化失败: {}", e)));
        }
    });

    result
}

/// 便捷日志宏 - 只记录几类核心问题，避免日志冗余

/// 记录数据获取失败日志
#[macro_export]
macro_rules! log_fetch_failure {
    ($msg:expr) => {
        log::error!("[数据获取失败] {}", $msg);
    };
    ($msg:expr, $($arg:tt)*) => {
        log::error!("[数据获取失败] {}", format!($msg, $($arg)*));
    };
}

/// 记录导出失败日志
#[macro_export]
macro_rules! log_export_failure {
    ($msg:expr) => {
        log::error!("[导出失败] {}", $msg);
    };
    ($msg:expr, $($arg:tt)*) => {
        log::error!("[导出失败] {}", format!($msg, $($arg)*));
    };
}

/// 记录用户操作日志
#[macro_export]
macro_rules! log_user_operation {
    ($msg:expr) => {
        log::info!("[用户操作] {}", $msg);
    };
    ($msg:expr, $($arg:tt)*) => {
        log::info!("[用户操作] {}", format!($msg, $($arg)*));
    };
}

/// 记录配置警告
#[macro_export]
macro_rules! log_config_warning {
    ($msg:expr) => {
        log::warn!("[配置警告] {}", $msg);
    };
    ($msg:expr, $($arg:tt)*) => {
        log::warn!("[配置警告] {}", format!($msg, $($arg)*));
    };
}
