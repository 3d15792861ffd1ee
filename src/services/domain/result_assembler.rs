/// 结果组装器
///
/// 将收发器、测试类别、测试用例和稀疏的测试结果拼装成一份有序、已评分的报告。
/// 组装是输入加显式时间的纯函数，"当前时间"由调用方传入。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::models::{
    CategoryResult, RawTestOutcome, TestCase, TestCategory, TestOutcome, TestResultWithCase,
    Transceiver, TransceiverResults,
};
use crate::services::domain::grading::{calculate_category_grade, calculate_grade, calculate_pass_rate};
use crate::utils::error::{AppError, AppResult};

/// 组装单个收发器的报告
///
/// **排序规则**:
/// - 类别按 `display_order` 升序（稳定排序）
/// - 测试用例先按 `category_id` 分组，组内按 `display_order` 升序（稳定排序）
///
/// **结果匹配**: 每个测试用例取第一个 `test_case_id` 相同的结果，没有则为未测试
///
/// **错误**: 收发器ID不存在时返回 `NotFoundError`，不产生任何部分结果
pub fn assemble_results(
    transceiver_id: &str,
    transceivers: &[Transceiver],
    categories: &[TestCategory],
    test_cases: &[TestCase],
    raw_outcomes: &[RawTestOutcome],
    now: DateTime<Utc>,
) -> AppResult<TransceiverResults> {
    let transceiver = transceivers
        .iter()
        .find(|t| t.id == transceiver_id)
        .cloned()
        .ok_or_else(|| AppError::not_found_error("Transceiver", format!("收发器不存在: {}", transceiver_id)))?;

    let mut sorted_categories: Vec<&TestCategory> = categories.iter().collect();
    sorted_categories.sort_by_key(|c| c.display_order);

    let cases_by_category = group_test_cases(test_cases);
    let outcomes_by_case = index_outcomes(transceiver_id, raw_outcomes, now);

    let category_results: Vec<CategoryResult> = sorted_categories
        .into_iter()
        .map(|category| {
            let tests: Vec<TestResultWithCase> = cases_by_category
                .get(category.id.as_str())
                .map(|cases| {
                    cases
                        .iter()
                        .map(|tc| {
                            let result = outcomes_by_case.get(tc.id.as_str()).cloned();
                            TestResultWithCase::new((*tc).clone(), result)
                        })
                        .collect()
                })
                .unwrap_or_default();

            calculate_category_grade(&CategoryResult::ungraded(category.clone(), tests))
        })
        .collect();

    let overall_pass_rate = calculate_pass_rate(category_results.iter().flat_map(|cr| cr.tests.iter()));
    let overall_grade = calculate_grade(overall_pass_rate);

    debug!(
        "[ASSEMBLER] 收发器 {} 组装完成: {} 个类别, {} 条结果, 总体 {} ({}%)",
        transceiver_id,
        category_results.len(),
        outcomes_by_case.len(),
        overall_grade,
        overall_pass_rate
    );

    Ok(TransceiverResults {
        transceiver,
        category_results,
        overall_grade,
        overall_pass_rate,
    })
}

/// 按类别分组测试用例，组内按 display_order 稳定排序
fn group_test_cases(test_cases: &[TestCase]) -> HashMap<&str, Vec<&TestCase>> {
    let mut groups: HashMap<&str, Vec<&TestCase>> = HashMap::new();
    for tc in test_cases {
        groups.entry(tc.category_id.as_str()).or_default().push(tc);
    }
    for cases in groups.values_mut() {
        cases.sort_by_key(|tc| tc.display_order);
    }
    groups
}

/// 归一化原始结果并按测试用例索引，同一用例保留第一条
fn index_outcomes<'a>(
    transceiver_id: &str,
    raw_outcomes: &'a [RawTestOutcome],
    now: DateTime<Utc>,
) -> HashMap<&'a str, TestOutcome> {
    let mut index: HashMap<&str, TestOutcome> = HashMap::new();
    for raw in raw_outcomes {
        index
            .entry(raw.test_case_id.as_str())
            .or_insert_with(|| TestOutcome::from_raw(transceiver_id, raw, now));
    }
    index
}
