/// 应用层服务模块
///
/// 应用层负责协调领域服务和基础设施服务，实现完整的对比与导出流程

/// 对比服务 - 获取数据并组装各槽位的报告
pub mod comparison_service;

/// 导出服务 - CSV / Excel 文件导出
pub mod export_service;

// 重新导出常用类型
pub use comparison_service::{ComparisonService, IComparisonService};
pub use export_service::{ExportedFile, FileExportService, IExportService};
