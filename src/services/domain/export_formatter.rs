/// 导出格式化
///
/// 将一个或多个报告展开为扁平表格。CSV 和 Excel 导出共用同一组行，
/// 行顺序完全由输入顺序决定，格式化时不再排序。

use crate::models::{CategoryResult, TestResultWithCase, TransceiverResults};

/// 表头列
pub const EXPORT_COLUMNS: [&str; 9] = [
    "Transceiver",
    "Manufacturer",
    "Type",
    "Category",
    "Test",
    "Status",
    "Value",
    "Grade",
    "Pass Rate",
];

/// 总体汇总行在 Category 列中的标记
pub const OVERALL_MARKER: &str = "OVERALL";

/// 导出表格的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub transceiver: String,
    pub manufacturer: String,
    pub transceiver_type: String,
    pub category: String,
    pub test: String,
    pub status: String,
    pub value: String,
    pub grade: String,
    pub pass_rate: String,
    overall: bool,
}

impl ExportRow {
    /// 单个测试的明细行，等级和通过率取所在类别
    fn for_test(results: &TransceiverResults, category: &CategoryResult, test: &TestResultWithCase) -> Self {
        Self {
            transceiver: results.transceiver.name.clone(),
            manufacturer: results.transceiver.manufacturer.clone(),
            transceiver_type: results.transceiver.transceiver_type.clone(),
            category: category.category.name.clone(),
            test: test.test_case.name.clone(),
            status: test.status().as_str().to_string(),
            value: test.value().to_string(),
            grade: category.grade.to_string(),
            pass_rate: format_pass_rate(category.pass_rate),
            overall: false,
        }
    }

    /// 收发器的总体汇总行
    fn overall(results: &TransceiverResults) -> Self {
        Self {
            transceiver: results.transceiver.name.clone(),
            manufacturer: results.transceiver.manufacturer.clone(),
            transceiver_type: results.transceiver.transceiver_type.clone(),
            category: OVERALL_MARKER.to_string(),
            test: String::new(),
            status: String::new(),
            value: String::new(),
            grade: results.overall_grade.to_string(),
            pass_rate: format_pass_rate(results.overall_pass_rate),
            overall: true,
        }
    }

    /// 是否为总体汇总行，与类别名称无关
    pub fn is_overall(&self) -> bool {
        self.overall
    }

    /// 按表头顺序返回各列
    pub fn fields(&self) -> [&str; 9] {
        [
            self.transceiver.as_str(),
            self.manufacturer.as_str(),
            self.transceiver_type.as_str(),
            self.category.as_str(),
            self.test.as_str(),
            self.status.as_str(),
            self.value.as_str(),
            self.grade.as_str(),
            self.pass_rate.as_str(),
        ]
    }
}

/// 通过率显示为 `<整数>%`
pub fn format_pass_rate(pass_rate: u32) -> String {
    format!("{}%", pass_rate)
}

/// 展开全部行：每个测试一行，每个收发器末尾一行 OVERALL
pub fn build_export_rows(results: &[TransceiverResults]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for result in results {
        for category in &result.category_results {
            for test in &category.tests {
                rows.push(ExportRow::for_test(result, category, test));
            }
        }
        rows.push(ExportRow::overall(result));
    }
    rows
}

/// CSV 字段转义：包含逗号、双引号或换行时整体加引号，内部双引号加倍
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 表头行
pub fn csv_header() -> String {
    EXPORT_COLUMNS.join(",")
}

/// 将报告序列化为 CSV 文本，行之间以 `\n` 分隔
pub fn format_results_for_export(results: &[TransceiverResults]) -> String {
    let mut lines = Vec::with_capacity(1 + results.len());
    lines.push(csv_header());

    for row in build_export_rows(results) {
        let line = row
            .fields()
            .iter()
            .map(|field| escape_csv_field(field))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}
