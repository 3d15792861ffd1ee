/// HTTP 数据源
///
/// 以 GET 方式获取静态 JSON 数组，地址为 `{base_url}/{资源名}`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;

use super::ITestDataSource;
use crate::models::{RawTestOutcome, TestCase, TestCategory, Transceiver};
use crate::utils::config::DataSourceConfig;
use crate::utils::error::{AppError, AppResult};

pub struct HttpDataSource {
    client: reqwest::Client,
    config: DataSourceConfig,
}

impl HttpDataSource {
    pub fn new(config: &DataSourceConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::configuration_error(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// 资源的完整地址
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource.trim_start_matches('/'))
    }

    /// 获取并解析一个JSON资源，HTTP 404 返回 None
    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> AppResult<Option<T>> {
        let url = self.resource_url(resource);
        debug!("[HTTP_SOURCE] GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::fetch_failure(resource, format!("请求失败: {}", e)))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::fetch_failure(resource, format!("HTTP状态码 {}", status)));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| AppError::fetch_failure(resource, format!("读取响应失败: {}", e)))?;
        let data = serde_json::from_slice(&body)
            .map_err(|e| AppError::fetch_failure(resource, format!("解析JSON失败: {}", e)))?;
        Ok(Some(data))
    }

    /// 必需资源：404 也视为获取失败
    async fn get_required<T: DeserializeOwned>(&self, resource: &str) -> AppResult<Vec<T>> {
        let items: Vec<T> = self
            .get_json(resource)
            .await?
            .ok_or_else(|| AppError::fetch_failure(resource, "资源不存在 (HTTP 404)"))?;
        info!("[HTTP_SOURCE] {} 获取 {} 条记录", resource, items.len());
        Ok(items)
    }
}

#[async_trait]
impl ITestDataSource for HttpDataSource {
    fn describe(&self) -> String {
        format!("http({})", self.config.base_url)
    }

    async fn load_transceivers(&self) -> AppResult<Vec<Transceiver>> {
        self.get_required(&self.config.transceivers_resource).await
    }

    async fn load_test_categories(&self) -> AppResult<Vec<TestCategory>> {
        self.get_required(&self.config.categories_resource).await
    }

    async fn load_test_cases(&self) -> AppResult<Vec<TestCase>> {
        self.get_required(&self.config.test_cases_resource).await
    }

    async fn load_test_results(&self, transceiver_id: &str) -> AppResult<Vec<RawTestOutcome>> {
        let resource = self.config.results_resource(transceiver_id);
        match self.get_json::<Vec<RawTestOutcome>>(&resource).await? {
            Some(outcomes) => Ok(outcomes),
            None => {
                debug!("[HTTP_SOURCE] 收发器 {} 没有测试结果资源", transceiver_id);
                Ok(Vec::new())
            }
        }
    }
}
