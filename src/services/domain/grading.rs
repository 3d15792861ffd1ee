/// 评分引擎
///
/// 纯函数：根据测试结果计算通过率，再由通过率映射字母等级。
/// 类别评分与总体评分使用同一套函数。

use crate::models::{CategoryResult, Grade, TestResultWithCase};

/// A 档下限（含）
pub const GRADE_A_THRESHOLD: u32 = 80;
/// B 档下限（含）
pub const GRADE_B_THRESHOLD: u32 = 70;
/// C 档下限（含）
pub const GRADE_C_THRESHOLD: u32 = 60;
/// D 档下限（含）
pub const GRADE_D_THRESHOLD: u32 = 50;

/// 计算通过率（0–100 的整数）
///
/// - 只统计有结果的测试，未测试项既不计入分子也不计入分母
/// - 没有任何结果时返回 0
/// - 四舍五入，恰好 .5 时向上取整（对非负数即远离零）
pub fn calculate_pass_rate<'a, I>(tests: I) -> u32
where
    I: IntoIterator<Item = &'a TestResultWithCase>,
{
    let (tested, passed) = tests
        .into_iter()
        .filter_map(|t| t.result.as_ref())
        .fold((0u64, 0u64), |(tested, passed), outcome| {
            (tested + 1, passed + u64::from(outcome.passed))
        });

    if tested == 0 {
        return 0;
    }

    // round(100 * passed / tested) == floor((200 * passed + tested) / (2 * tested))
    ((200 * passed + tested) / (2 * tested)) as u32
}

/// 由通过率计算字母等级，各档下限包含在内
pub fn calculate_grade(pass_rate: u32) -> Grade {
    if pass_rate >= GRADE_A_THRESHOLD {
        Grade::A
    } else if pass_rate >= GRADE_B_THRESHOLD {
        Grade::B
    } else if pass_rate >= GRADE_C_THRESHOLD {
        Grade::C
    } else if pass_rate >= GRADE_D_THRESHOLD {
        Grade::D
    } else {
        Grade::F
    }
}

/// 重新计算类别的通过率和等级
///
/// 返回副本，只替换 `pass_rate` 和 `grade`，其余字段原样保留
pub fn calculate_category_grade(category_result: &CategoryResult) -> CategoryResult {
    let pass_rate = calculate_pass_rate(&category_result.tests);
    let grade = calculate_grade(pass_rate);

    CategoryResult {
        pass_rate,
        grade,
        ..category_result.clone()
    }
}
