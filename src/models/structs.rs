use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Grade, TestStatus};

/// 收发器（被测硬件单元）
///
/// 时间戳只用于显示，保持数据源给出的原始字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transceiver {
    /// 唯一标识符
    pub id: String,
    /// 名称
    pub name: String,
    /// 制造商
    pub manufacturer: String,
    /// 类型（例如 "Active Optical Cable"）
    #[serde(rename = "type")]
    pub transceiver_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 测试类别，固定目录数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 展示顺序，也决定报告中的类别顺序
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// 测试用例，固定目录数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    /// 所属类别ID
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 人工可读的通过标准
    #[serde(default)]
    pub pass_criteria: String,
    /// 类别内的展示顺序
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// 数据源返回的原始测试结果（按收发器稀疏存储）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTestOutcome {
    pub test_case_id: String,
    pub passed: bool,
    /// 自由文本测量值
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 归一化后的测试结果
///
/// `tested_at` / `created_at` 是组装时刻，不是测量时刻
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// 由收发器ID和测试用例ID合成的标识
    pub id: String,
    pub transceiver_id: String,
    pub test_case_id: String,
    pub passed: bool,
    pub value: String,
    pub notes: String,
    pub tested_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TestOutcome {
    /// 合成结果ID: `result-<transceiver_id>-<test_case_id>`
    pub fn synthesize_id(transceiver_id: &str, test_case_id: &str) -> String {
        format!("result-{}-{}", transceiver_id, test_case_id)
    }

    /// 从原始结果归一化，时间戳使用调用方给定的时刻
    pub fn from_raw(transceiver_id: &str, raw: &RawTestOutcome, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::synthesize_id(transceiver_id, &raw.test_case_id),
            transceiver_id: transceiver_id.to_string(),
            test_case_id: raw.test_case_id.clone(),
            passed: raw.passed,
            value: raw.value.clone().unwrap_or_default(),
            notes: raw.notes.clone().unwrap_or_default(),
            tested_at: now,
            created_at: now,
        }
    }
}

/// 测试用例与其（至多一个）结果的配对，是最小计分单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultWithCase {
    pub test_case: TestCase,
    /// 未测试时为 None
    pub result: Option<TestOutcome>,
}

impl TestResultWithCase {
    pub fn new(test_case: TestCase, result: Option<TestOutcome>) -> Self {
        Self { test_case, result }
    }

    /// 展示/导出用状态
    pub fn status(&self) -> TestStatus {
        match &self.result {
            Some(outcome) if outcome.passed => TestStatus::Passed,
            Some(_) => TestStatus::Failed,
            None => TestStatus::NotTested,
        }
    }

    /// 测量值，未测试时为空串
    pub fn value(&self) -> &str {
        self.result.as_ref().map(|r| r.value.as_str()).unwrap_or("")
    }

    pub fn is_tested(&self) -> bool {
        self.result.is_some()
    }
}

/// 单个类别的计分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub category: TestCategory,
    /// 按测试用例 display_order 排序
    pub tests: Vec<TestResultWithCase>,
    pub grade: Grade,
    /// 0–100 的整数百分比
    pub pass_rate: u32,
}

impl CategoryResult {
    /// 创建未计分的类别结果（等级 F，通过率 0）
    pub fn ungraded(category: TestCategory, tests: Vec<TestResultWithCase>) -> Self {
        Self {
            category,
            tests,
            grade: Grade::F,
            pass_rate: 0,
        }
    }

    /// 有结果的测试数量
    pub fn tested_count(&self) -> usize {
        self.tests.iter().filter(|t| t.is_tested()).count()
    }

    /// 通过的测试数量
    pub fn passed_count(&self) -> usize {
        self.tests
            .iter()
            .filter(|t| t.status() == TestStatus::Passed)
            .count()
    }
}

/// 单个收发器的完整报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransceiverResults {
    pub transceiver: Transceiver,
    /// 按类别 display_order 排序
    pub category_results: Vec<CategoryResult>,
    pub overall_grade: Grade,
    /// 基于所有类别全部测试计算，而不是类别通过率的平均值
    pub overall_pass_rate: u32,
}

impl TransceiverResults {
    /// 按类别顺序、类别内测试顺序展开全部测试
    pub fn all_tests(&self) -> impl Iterator<Item = &TestResultWithCase> {
        self.category_results.iter().flat_map(|cr| cr.tests.iter())
    }

    pub fn tested_count(&self) -> usize {
        self.category_results.iter().map(|cr| cr.tested_count()).sum()
    }

    pub fn passed_count(&self) -> usize {
        self.category_results.iter().map(|cr| cr.passed_count()).sum()
    }
}

/// 固定目录：测试类别与测试用例
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCatalog {
    pub categories: Vec<TestCategory>,
    pub test_cases: Vec<TestCase>,
}
