/// 服务层模块
/// 包含所有业务逻辑和基础设施服务

/// 基础设施层服务 (外部系统交互)
pub mod infrastructure;

/// 领域服务层 (核心业务逻辑)
pub mod domain;

/// 应用层服务 (业务流程协调)
pub mod application;

// 重新导出常用类型
pub use infrastructure::{CatalogCache, DataSourceFactory, DirectoryDataSource, HttpDataSource, ITestDataSource};
pub use domain::{
    assemble_results, calculate_category_grade, calculate_grade, calculate_pass_rate, format_results_for_export,
    Clock, ComparisonSlots, FixedClock, RequestTicket, SlotStatus, SystemClock,
};
pub use application::{ComparisonService, ExportedFile, FileExportService, IComparisonService, IExportService};
