/// 测试数据源
///
/// 四类只读资源：收发器列表、测试类别、测试用例、单个收发器的测试结果。
/// 结果资源不存在时视为零条结果，其余资源不存在即为获取失败。

pub mod http_data_source;
pub mod directory_data_source;

use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::models::{DataSourceKind, RawTestOutcome, TestCase, TestCategory, Transceiver};
use crate::utils::config::DataSourceConfig;
use crate::utils::error::AppResult;

pub use directory_data_source::DirectoryDataSource;
pub use http_data_source::HttpDataSource;

/// 测试数据源接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ITestDataSource: Send + Sync {
    /// 数据源描述，用于日志
    fn describe(&self) -> String;

    /// 获取全部收发器
    async fn load_transceivers(&self) -> AppResult<Vec<Transceiver>>;

    /// 获取全部测试类别
    async fn load_test_categories(&self) -> AppResult<Vec<TestCategory>>;

    /// 获取全部测试用例
    async fn load_test_cases(&self) -> AppResult<Vec<TestCase>>;

    /// 获取指定收发器的测试结果，资源不存在时返回空列表
    async fn load_test_results(&self, transceiver_id: &str) -> AppResult<Vec<RawTestOutcome>>;
}

/// 数据源工厂
pub struct DataSourceFactory;

impl DataSourceFactory {
    /// 按配置创建数据源
    pub fn create(config: &DataSourceConfig) -> AppResult<Arc<dyn ITestDataSource>> {
        let source: Arc<dyn ITestDataSource> = match config.kind {
            DataSourceKind::Http => Arc::new(HttpDataSource::new(config)?),
            DataSourceKind::Directory => Arc::new(DirectoryDataSource::new(config)),
        };
        info!("🔧 [DATA_SOURCE] 使用数据源: {}", source.describe());
        Ok(source)
    }
}
