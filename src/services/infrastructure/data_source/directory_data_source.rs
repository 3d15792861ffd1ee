/// 目录数据源
///
/// 从本地目录读取与 HTTP 资源同名的 JSON 文件，便于离线使用和测试

use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;

use super::ITestDataSource;
use crate::models::{RawTestOutcome, TestCase, TestCategory, Transceiver};
use crate::utils::config::DataSourceConfig;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug)]
pub struct DirectoryDataSource {
    root_dir: PathBuf,
    config: DataSourceConfig,
}

impl DirectoryDataSource {
    pub fn new(config: &DataSourceConfig) -> Self {
        Self {
            root_dir: config.directory.clone(),
            config: config.clone(),
        }
    }

    fn resource_path(&self, resource: &str) -> PathBuf {
        self.root_dir.join(resource)
    }

    /// 读取一个JSON文件，文件不存在返回 None
    async fn read_json<T: DeserializeOwned>(&self, resource: &str) -> AppResult<Option<T>> {
        let path = self.resource_path(resource);
        debug!("[DIR_SOURCE] 读取 {:?}", path);

        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::fetch_failure(resource, format!("读取文件 {:?} 失败: {}", path, e)));
            }
        };

        let data = serde_json::from_slice(&content)
            .map_err(|e| AppError::fetch_failure(resource, format!("解析文件 {:?} 失败: {}", path, e)))?;
        Ok(Some(data))
    }

    async fn read_required<T: DeserializeOwned>(&self, resource: &str) -> AppResult<Vec<T>> {
        let items: Vec<T> = self
            .read_json(resource)
            .await?
            .ok_or_else(|| AppError::fetch_failure(resource, format!("文件不存在: {:?}", self.resource_path(resource))))?;
        info!("[DIR_SOURCE] {} 读取 {} 条记录", resource, items.len());
        Ok(items)
    }
}

#[async_trait]
impl ITestDataSource for DirectoryDataSource {
    fn describe(&self) -> String {
        format!("directory({})", self.root_dir.display())
    }

    async fn load_transceivers(&self) -> AppResult<Vec<Transceiver>> {
        self.read_required(&self.config.transceivers_resource).await
    }

    async fn load_test_categories(&self) -> AppResult<Vec<TestCategory>> {
        self.read_required(&self.config.categories_resource).await
    }

    async fn load_test_cases(&self) -> AppResult<Vec<TestCase>> {
        self.read_required(&self.config.test_cases_resource).await
    }

    async fn load_test_results(&self, transceiver_id: &str) -> AppResult<Vec<RawTestOutcome>> {
        let resource = self.config.results_resource(transceiver_id);
        Ok(self.read_json(&resource).await?.unwrap_or_default())
    }
}
