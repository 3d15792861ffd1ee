//! 命令测试共用的数据与状态构造

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use crate::commands::AppState;
use crate::models::{RawTestOutcome, TestCase, TestCategory, Transceiver};
use crate::services::domain::FixedClock;
use crate::services::infrastructure::data_source::MockITestDataSource;
use crate::services::infrastructure::{CatalogCache, ITestDataSource};
use crate::services::{ComparisonService, FileExportService};
use crate::utils::config::AppConfig;

/// 两个收发器、一个类别、一个测试用例；t1 通过，其余失败
pub fn mock_source() -> MockITestDataSource {
    let mut mock = MockITestDataSource::new();
    mock.expect_load_transceivers().returning(|| {
        Ok(vec![
            Transceiver {
                id: "t2".to_string(),
                name: "Beta".to_string(),
                manufacturer: "Acme".to_string(),
                transceiver_type: "SFP28".to_string(),
                created_at: None,
                updated_at: None,
            },
            Transceiver {
                id: "t1".to_string(),
                name: "Alpha".to_string(),
                manufacturer: "Acme".to_string(),
                transceiver_type: "QSFP28".to_string(),
                created_at: None,
                updated_at: None,
            },
        ])
    });
    mock.expect_load_test_categories().returning(|| {
        Ok(vec![TestCategory {
            id: "c1".to_string(),
            name: "Optical".to_string(),
            description: String::new(),
            display_order: 0,
            created_at: None,
        }])
    });
    mock.expect_load_test_cases().returning(|| {
        Ok(vec![TestCase {
            id: "tc1".to_string(),
            category_id: "c1".to_string(),
            name: "Tx Power".to_string(),
            description: String::new(),
            pass_criteria: "-7..2 dBm".to_string(),
            display_order: 0,
            created_at: None,
        }])
    });
    mock.expect_load_test_results().returning(|id| {
        Ok(vec![RawTestOutcome {
            test_case_id: "tc1".to_string(),
            passed: id == "t1",
            value: Some("-1.2 dBm".to_string()),
            notes: None,
        }])
    });
    mock
}

pub fn state_with(mock: MockITestDataSource, export_dir: &TempDir) -> AppState {
    let mut config = AppConfig::default();
    config.export.output_dir = export_dir.path().to_path_buf();

    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
    let source: Arc<dyn ITestDataSource> = Arc::new(mock);
    let catalog = Arc::new(CatalogCache::new(source.clone()));
    let comparison = Arc::new(ComparisonService::new(source, catalog, clock.clone()));
    let export = Arc::new(FileExportService::new(config.export.clone(), clock));
    AppState::with_services(config, comparison, export)
}
