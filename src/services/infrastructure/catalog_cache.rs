/// 测试目录缓存
///
/// 测试类别和测试用例对所有收发器相同，首次访问时获取并缓存，
/// 并发的报告组装共享同一份数据。只有显式调用 `invalidate` 才会重新获取，获取失败不缓存。

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::RwLock;

use super::data_source::ITestDataSource;
use crate::models::TestCatalog;
use crate::utils::error::AppResult;

pub struct CatalogCache {
    source: Arc<dyn ITestDataSource>,
    cached: RwLock<Option<Arc<TestCatalog>>>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn ITestDataSource>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// 读取目录，未缓存时从数据源获取
    pub async fn get(&self) -> AppResult<Arc<TestCatalog>> {
        if let Some(catalog) = self.cached.read().await.as_ref() {
            return Ok(catalog.clone());
        }

        // 持有写锁获取，保证并发的首次访问只触发一次获取
        let mut guard = self.cached.write().await;
        if let Some(catalog) = guard.as_ref() {
            debug!("[CATALOG] 等待期间已被其他请求填充");
            return Ok(catalog.clone());
        }

        let (categories, test_cases) = tokio::try_join!(
            self.source.load_test_categories(),
            self.source.load_test_cases()
        )?;
        info!(
            "✅ [CATALOG] 测试目录已缓存: {} 个类别, {} 个测试用例",
            categories.len(),
            test_cases.len()
        );

        let catalog = Arc::new(TestCatalog { categories, test_cases });
        *guard = Some(catalog.clone());
        Ok(catalog)
    }

    /// 清空缓存，下次读取时重新获取
    pub async fn invalidate(&self) {
        let mut guard = self.cached.write().await;
        if guard.take().is_some() {
            info!("🔄 [CATALOG] 测试目录缓存已清空");
        }
    }

    pub async fn is_populated(&self) -> bool {
        self.cached.read().await.is_some()
    }
}
