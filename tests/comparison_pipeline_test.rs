//! 对比流程集成测试
//!
//! 使用本地目录数据源，从选择槽位到导出文件完整走一遍

mod common;

use compare_lib::commands;
use compare_lib::logging::init_logger;
use compare_lib::models::{DataSourceKind, ExportFormat, Grade, TestStatus};
use compare_lib::services::domain::SlotStatus;
use compare_lib::utils::config::LoggingConfig;
use compare_lib::{AppConfig, AppState};
use tempfile::TempDir;

/// 创建基于临时目录的应用状态
fn create_test_state(root: &TempDir) -> AppState {
    let data_dir = root.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    common::write_dataset(&data_dir);

    let mut config = AppConfig::default();
    config.data_source.kind = DataSourceKind::Directory;
    config.data_source.directory = data_dir;
    config.export.output_dir = root.path().join("exports");

    init_logger(&LoggingConfig::default()).ok();
    AppState::new(config).expect("应用状态初始化应该成功")
}

#[tokio::test]
async fn test_transceivers_listed_by_name() {
    let root = TempDir::new().unwrap();
    let state = create_test_state(&root);

    let transceivers = commands::get_transceivers(&state).await.unwrap();
    let ids: Vec<&str> = transceivers.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t-100", "t-200"]);
    assert_eq!(transceivers[1].created_at.as_deref(), Some("2024-03-01T08:00:00Z"));
}

#[tokio::test]
async fn test_compare_orders_and_grades_reports() {
    let root = TempDir::new().unwrap();
    let state = create_test_state(&root);

    commands::select_transceiver(&state, 0, Some("t-100".to_string())).await.unwrap();
    let snapshot = commands::compare_selected(&state).await.unwrap();

    let results = snapshot.slots[0].results().expect("槽位0应该有报告");
    let categories: Vec<&str> = results
        .category_results
        .iter()
        .map(|c| c.category.name.as_str())
        .collect();
    assert_eq!(categories, vec!["Power", "Signal Integrity"]);

    let signal = &results.category_results[1];
    let tests: Vec<&str> = signal.tests.iter().map(|t| t.test_case.name.as_str()).collect();
    assert_eq!(tests, vec!["Jitter", "Eye Height"]);
    assert_eq!(signal.grade, Grade::A);
    assert_eq!(signal.tests[1].result.as_ref().unwrap().notes, "nominal");

    assert_eq!(results.category_results[0].grade, Grade::F);
    // 总体按全部测试计算：2/3 = 67，而不是类别平均 50
    assert_eq!(results.overall_pass_rate, 67);
    assert_eq!(results.overall_grade, Grade::C);
}

#[tokio::test]
async fn test_untested_and_unknown_transceivers() {
    let root = TempDir::new().unwrap();
    let state = create_test_state(&root);

    commands::select_transceiver(&state, 0, Some("t-200".to_string())).await.unwrap();
    commands::select_transceiver(&state, 1, Some("t-999".to_string())).await.unwrap();
    let snapshot = commands::compare_selected(&state).await.unwrap();

    let untested = snapshot.slots[0].results().unwrap();
    assert!(untested.all_tests().all(|t| t.status() == TestStatus::NotTested));
    assert!(untested.category_results.iter().all(|c| c.pass_rate == 0 && c.grade == Grade::F));
    assert_eq!(untested.overall_grade, Grade::F);

    match &snapshot.slots[1].status {
        SlotStatus::Failed(err) => assert_eq!(err.error_code(), "NOT_FOUND_ERROR"),
        other => panic!("槽位1应该失败，实际: {:?}", other),
    }
}

#[tokio::test]
async fn test_export_csv_after_compare() {
    let root = TempDir::new().unwrap();
    let state = create_test_state(&root);

    assert!(commands::export_comparison_csv(&state).await.is_err());

    commands::select_transceiver(&state, 0, Some("t-100".to_string())).await.unwrap();
    commands::select_transceiver(&state, 1, Some("t-200".to_string())).await.unwrap();
    commands::compare_selected(&state).await.unwrap();

    let exported = commands::export_comparison_csv(&state).await.unwrap();
    assert!(exported.file_name.starts_with("interconnect-test-results-"));
    assert!(exported.file_name.ends_with(".csv"));
    assert_eq!(exported.row_count, 8);

    let content = std::fs::read_to_string(&exported.path).unwrap();
    let mut expected = vec![common::HEADER];
    expected.extend_from_slice(&common::T100_ROWS);
    expected.extend_from_slice(&common::T200_ROWS);
    assert_eq!(content, expected.join("\n"));
}

#[tokio::test]
async fn test_export_excel_after_compare() {
    let root = TempDir::new().unwrap();
    let state = create_test_state(&root);

    commands::select_transceiver(&state, 3, Some("t-100".to_string())).await.unwrap();
    commands::compare_selected(&state).await.unwrap();

    let exported = commands::export_comparison(&state, ExportFormat::Xlsx).await.unwrap();
    assert!(exported.file_name.ends_with(".xlsx"));
    assert_eq!(exported.row_count, 4);
    assert!(std::fs::metadata(&exported.path).unwrap().len() > 0);
}

/// 重新加载后能读到修改过的测试目录
#[tokio::test]
async fn test_reload_catalog_picks_up_changes() {
    let root = TempDir::new().unwrap();
    let state = create_test_state(&root);

    commands::select_transceiver(&state, 0, Some("t-100".to_string())).await.unwrap();
    let before = commands::compare_selected(&state).await.unwrap();
    assert_eq!(before.slots[0].results().unwrap().category_results.len(), 2);

    std::fs::write(
        root.path().join("data").join("test-categories.json"),
        r#"[{"id": "c-pwr", "name": "Power", "display_order": 0}]"#,
    )
    .unwrap();

    // 未重新加载时仍使用缓存
    let cached = commands::compare_selected(&state).await.unwrap();
    assert_eq!(cached.slots[0].results().unwrap().category_results.len(), 2);

    commands::reload_catalog(&state).await.unwrap();
    let after = commands::compare_selected(&state).await.unwrap();
    let results = after.slots[0].results().unwrap();
    assert_eq!(results.category_results.len(), 1);
    assert_eq!(results.overall_pass_rate, 0);
}
