/// 对比服务
///
/// 负责协调单个收发器报告的获取与组装：
/// 1. 收发器列表每次请求都重新获取
/// 2. 测试类别与测试用例走共享的目录缓存
/// 3. 测试结果获取失败时按零条结果处理，只记录警告
/// 4. 多个槽位的组装并发执行，互不影响

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{info, warn};

use crate::models::{RawTestOutcome, Transceiver, TransceiverResults};
use crate::services::domain::{assemble_results, Clock, RequestTicket};
use crate::services::infrastructure::{CatalogCache, ITestDataSource};
use crate::utils::error::AppResult;

/// 对比服务接口
#[async_trait]
pub trait IComparisonService: Send + Sync {
    /// 获取收发器列表，按名称升序，供选择框使用
    async fn list_transceivers(&self) -> AppResult<Vec<Transceiver>>;

    /// 获取并组装单个收发器的报告
    async fn assemble_for(&self, transceiver_id: &str) -> AppResult<TransceiverResults>;

    /// 并发执行一批槽位请求，结果与凭据一一对应
    async fn run_tickets(&self, tickets: Vec<RequestTicket>) -> Vec<(RequestTicket, AppResult<TransceiverResults>)>;

    /// 清空目录缓存
    async fn reload_catalog(&self);
}

pub struct ComparisonService {
    source: Arc<dyn ITestDataSource>,
    catalog: Arc<CatalogCache>,
    clock: Arc<dyn Clock>,
}

impl ComparisonService {
    pub fn new(source: Arc<dyn ITestDataSource>, catalog: Arc<CatalogCache>, clock: Arc<dyn Clock>) -> Self {
        Self { source, catalog, clock }
    }

    /// 获取测试结果，失败时降级为空列表
    async fn load_outcomes_lenient(&self, transceiver_id: &str) -> Vec<RawTestOutcome> {
        match self.source.load_test_results(transceiver_id).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!("⚠️ [COMPARISON] 收发器 {} 的测试结果获取失败，按未测试处理: {}", transceiver_id, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl IComparisonService for ComparisonService {
    async fn list_transceivers(&self) -> AppResult<Vec<Transceiver>> {
        let mut transceivers = self.source.load_transceivers().await.map_err(|e| {
            crate::log_fetch_failure!("收发器列表: {}", e);
            e
        })?;
        // 忽略大小写排序，大小写不同的同名项再按原字节序区分
        transceivers.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(transceivers)
    }

    async fn assemble_for(&self, transceiver_id: &str) -> AppResult<TransceiverResults> {
        let (transceivers, catalog, outcomes) = tokio::join!(
            self.source.load_transceivers(),
            self.catalog.get(),
            self.load_outcomes_lenient(transceiver_id)
        );

        let transceivers = transceivers.map_err(|e| {
            crate::log_fetch_failure!("收发器列表: {}", e);
            e
        })?;
        let catalog = catalog.map_err(|e| {
            crate::log_fetch_failure!("测试目录: {}", e);
            e
        })?;

        let results = assemble_results(
            transceiver_id,
            &transceivers,
            &catalog.categories,
            &catalog.test_cases,
            &outcomes,
            self.clock.now(),
        )?;

        info!(
            "✅ [COMPARISON] {} 组装完成: 总体 {} ({}%), 已测 {}/{}",
            results.transceiver.name,
            results.overall_grade,
            results.overall_pass_rate,
            results.tested_count(),
            results.all_tests().count()
        );
        Ok(results)
    }

    async fn run_tickets(&self, tickets: Vec<RequestTicket>) -> Vec<(RequestTicket, AppResult<TransceiverResults>)> {
        let tasks = tickets.into_iter().map(|ticket| async move {
            let outcome = self.assemble_for(&ticket.transceiver_id).await;
            if let Err(e) = &outcome {
                warn!("❌ [COMPARISON] 槽位 {} 组装失败: {}", ticket.slot, e);
            }
            (ticket, outcome)
        });
        join_all(tasks).await
    }

    async fn reload_catalog(&self) {
        self.catalog.invalidate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, TestCase, TestCategory, TestStatus};
    use crate::services::domain::FixedClock;
    use crate::services::infrastructure::data_source::MockITestDataSource;
    use crate::utils::error::AppError;
    use chrono::{TimeZone, Utc};

    fn transceivers() -> Vec<Transceiver> {
        named(&["Zeta", "Alpha", "Mu"])
    }

    fn named(names: &[&str]) -> Vec<Transceiver> {
        names
            .iter()
            .map(|name| Transceiver {
                id: name.to_lowercase(),
                name: name.to_string(),
                manufacturer: "Acme".to_string(),
                transceiver_type: "QSFP-DD".to_string(),
                created_at: None,
                updated_at: None,
            })
            .collect()
    }

    fn categories() -> Vec<TestCategory> {
        vec![TestCategory {
            id: "c1".to_string(),
            name: "Signal Integrity".to_string(),
            description: String::new(),
            display_order: 0,
            created_at: None,
        }]
    }

    fn test_cases() -> Vec<TestCase> {
        (0..2)
            .map(|i| TestCase {
                id: format!("tc{}", i),
                category_id: "c1".to_string(),
                name: format!("Case {}", i),
                description: String::new(),
                pass_criteria: String::new(),
                display_order: i,
                created_at: None,
            })
            .collect()
    }

    fn outcome(case_id: &str, passed: bool) -> RawTestOutcome {
        RawTestOutcome {
            test_case_id: case_id.to_string(),
            passed,
            value: Some("1".to_string()),
            notes: None,
        }
    }

    fn service_with(mock: MockITestDataSource) -> ComparisonService {
        let source: Arc<dyn ITestDataSource> = Arc::new(mock);
        let catalog = Arc::new(CatalogCache::new(source.clone()));
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        ComparisonService::new(source, catalog, clock)
    }

    fn mock_with_catalog() -> MockITestDataSource {
        let mut mock = MockITestDataSource::new();
        mock.expect_load_transceivers().returning(|| Ok(transceivers()));
        mock.expect_load_test_categories().times(1).returning(|| Ok(categories()));
        mock.expect_load_test_cases().times(1).returning(|| Ok(test_cases()));
        mock
    }

    #[tokio::test]
    async fn test_list_transceivers_sorted_by_name() {
        let mut mock = MockITestDataSource::new();
        mock.expect_load_transceivers().returning(|| Ok(transceivers()));
        let service = service_with(mock);
        let names: Vec<String> = service
            .list_transceivers()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
    }

    #[tokio::test]
    async fn test_list_transceivers_sort_ignores_case() {
        let mut mock = MockITestDataSource::new();
        mock.expect_load_transceivers()
            .returning(|| Ok(named(&["Beta", "alpha", "Gamma", "beta"])));
        let service = service_with(mock);
        let names: Vec<String> = service
            .list_transceivers()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["alpha", "Beta", "beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_assemble_uses_injected_clock() {
        let mut mock = mock_with_catalog();
        mock.expect_load_test_results()
            .returning(|_| Ok(vec![outcome("tc0", true), outcome("tc1", false)]));
        let service = service_with(mock);

        let results = service.assemble_for("alpha").await.unwrap();
        assert_eq!(results.overall_pass_rate, 50);
        assert_eq!(results.overall_grade, Grade::D);

        let first = results.category_results[0].tests[0].result.as_ref().unwrap();
        assert_eq!(first.tested_at, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(first.id, "result-alpha-tc0");
    }

    #[tokio::test]
    async fn test_outcome_fetch_failure_treated_as_untested() {
        let mut mock = mock_with_catalog();
        mock.expect_load_test_results()
            .returning(|id| Err(AppError::fetch_failure(format!("test-results-{}.json", id), "HTTP状态码 500")));
        let service = service_with(mock);

        let results = service.assemble_for("mu").await.unwrap();
        assert!(results
            .all_tests()
            .all(|t| t.status() == TestStatus::NotTested));
        assert_eq!(results.overall_grade, Grade::F);
    }

    #[tokio::test]
    async fn test_transceiver_fetch_failure_propagates() {
        let mut mock = MockITestDataSource::new();
        mock.expect_load_transceivers()
            .returning(|| Err(AppError::fetch_failure("transceivers.json", "HTTP状态码 503")));
        mock.expect_load_test_categories().returning(|| Ok(categories()));
        mock.expect_load_test_cases().returning(|| Ok(test_cases()));
        mock.expect_load_test_results().returning(|_| Ok(Vec::new()));
        let service = service_with(mock);

        let err = service.assemble_for("alpha").await.unwrap_err();
        assert_eq!(err.error_code(), "FETCH_FAILURE");
    }

    /// 多个槽位并发组装只获取一次目录，失败的槽位不影响其他槽位
    #[tokio::test]
    async fn test_run_tickets_shares_catalog_and_isolates_failures() {
        let mut mock = mock_with_catalog();
        mock.expect_load_test_results().returning(|_| Ok(vec![outcome("tc0", true)]));
        let service = service_with(mock);

        let tickets = vec![
            RequestTicket { slot: 0, generation: 1, transceiver_id: "alpha".to_string() },
            RequestTicket { slot: 1, generation: 1, transceiver_id: "ghost".to_string() },
            RequestTicket { slot: 2, generation: 1, transceiver_id: "zeta".to_string() },
        ];
        let outcomes = service.run_tickets(tickets).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].1.as_ref().unwrap().overall_pass_rate, 100);
        assert!(outcomes[1].1.as_ref().unwrap_err().is_not_found());
        assert_eq!(outcomes[2].0.slot, 2);
        assert!(outcomes[2].1.is_ok());
    }

    #[tokio::test]
    async fn test_reload_catalog_refetches() {
        let mut mock = MockITestDataSource::new();
        mock.expect_load_transceivers().returning(|| Ok(transceivers()));
        mock.expect_load_test_categories().times(2).returning(|| Ok(categories()));
        mock.expect_load_test_cases().times(2).returning(|| Ok(test_cases()));
        mock.expect_load_test_results().returning(|_| Ok(Vec::new()));
        let service = service_with(mock);

        service.assemble_for("alpha").await.unwrap();
        service.assemble_for("alpha").await.unwrap();
        service.reload_catalog().await;
        service.assemble_for("alpha").await.unwrap();
    }
}
