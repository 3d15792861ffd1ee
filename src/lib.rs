/// 互连收发器测试对比系统 - 核心库
pub mod models;
pub mod utils;
pub mod logging;
pub mod services;
pub mod commands;

// 重新导出常用类型，方便使用
pub use models::*;
pub use utils::{AppConfig, AppError, AppResult};
pub use services::*;
pub use commands::AppState;
