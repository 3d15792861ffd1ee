/// 命令模块
///
/// 面向展示层的命令入口，所有命令返回 `Result<T, String>`，错误信息可直接展示给用户

pub mod comparison_commands;
pub mod export_commands;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use log::info;
use tokio::sync::Mutex;

use crate::services::domain::{ComparisonSlots, SystemClock};
use crate::services::infrastructure::{CatalogCache, DataSourceFactory};
use crate::services::{ComparisonService, FileExportService, IComparisonService, IExportService};
use crate::utils::config::AppConfig;
use crate::utils::error::AppResult;

// 重新导出命令
pub use comparison_commands::{
    compare_selected, get_comparison_state, get_transceivers, reload_catalog, select_transceiver,
    ComparisonSnapshot,
};
pub use export_commands::{export_comparison, export_comparison_csv};

/// 应用状态，包含所有服务实例和槽位状态
pub struct AppState {
    pub config: AppConfig,
    pub comparison_service: Arc<dyn IComparisonService>,
    pub export_service: Arc<dyn IExportService>,
    pub slots: Mutex<ComparisonSlots>,
}

impl AppState {
    /// 按配置创建应用状态
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let clock = Arc::new(SystemClock);

        // 基础设施
        let source = DataSourceFactory::create(&config.data_source)?;
        let catalog = Arc::new(CatalogCache::new(source.clone()));

        // 应用服务
        let comparison_service: Arc<dyn IComparisonService> =
            Arc::new(ComparisonService::new(source, catalog, clock.clone()));
        let export_service: Arc<dyn IExportService> =
            Arc::new(FileExportService::new(config.export.clone(), clock));

        info!(
            "🚀 [APP_STATE] {} 初始化完成 ({} 个对比槽位)",
            config.app_settings.app_name, config.app_settings.max_comparison_slots
        );
        Ok(Self::with_services(config, comparison_service, export_service))
    }

    /// 使用给定的服务实例创建应用状态
    pub fn with_services(
        config: AppConfig,
        comparison_service: Arc<dyn IComparisonService>,
        export_service: Arc<dyn IExportService>,
    ) -> Self {
        let slots = ComparisonSlots::new(config.app_settings.max_comparison_slots);
        Self {
            config,
            comparison_service,
            export_service,
            slots: Mutex::new(slots),
        }
    }
}
