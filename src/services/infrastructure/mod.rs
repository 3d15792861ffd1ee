/// 基础设施层服务模块
/// 负责与外部系统的交互，如测试数据获取、目录缓存、Excel文件写入等

/// 测试数据源（HTTP / 本地目录）
pub mod data_source;

/// 测试目录缓存
pub mod catalog_cache;

/// Excel 报告写入
pub mod excel;

// 重新导出常用接口和实现
pub use data_source::{DataSourceFactory, DirectoryDataSource, HttpDataSource, ITestDataSource};
pub use catalog_cache::CatalogCache;
pub use excel::write_results_workbook;
