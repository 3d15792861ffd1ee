/// Excel 报告写入
///
/// 与 CSV 导出使用同一组行和表头，表头加粗，Grade 列按等级着色，OVERALL 行加粗

use std::path::Path;

use log::info;
use rust_xlsxwriter::{Format, Workbook};

use crate::models::{Grade, TransceiverResults};
use crate::services::domain::export_formatter::{build_export_rows, EXPORT_COLUMNS};
use crate::utils::error::AppResult;

/// Grade 列在表格中的位置
const GRADE_COLUMN: u16 = 7;

const SHEET_NAME: &str = "Test Results";

/// 等级对应的底色
pub fn grade_fill_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "#C6EFCE",
        Grade::B => "#BDD7EE",
        Grade::C => "#FFEB9C",
        Grade::D => "#F8CBAD",
        Grade::F => "#FFC7CE",
    }
}

/// 将报告写入 `.xlsx` 文件
pub fn write_results_workbook(results: &[TransceiverResults], output_path: &Path) -> AppResult<usize> {
    let rows = build_export_rows(results);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_background_color("#D3D3D3");
    let overall_format = Format::new().set_bold();

    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, value) in row.fields().iter().enumerate() {
            let col = col as u16;
            if col == GRADE_COLUMN {
                let mut grade_format = Format::new();
                if let Ok(grade) = value.parse::<Grade>() {
                    grade_format = grade_format.set_background_color(grade_fill_color(grade));
                }
                if row.is_overall() {
                    grade_format = grade_format.set_bold();
                }
                worksheet.write_string_with_format(row_num, col, *value, &grade_format)?;
            } else if row.is_overall() {
                worksheet.write_string_with_format(row_num, col, *value, &overall_format)?;
            } else {
                worksheet.write_string(row_num, col, *value)?;
            }
        }
    }

    let widths = [24.0, 18.0, 12.0, 22.0, 28.0, 12.0, 16.0, 8.0, 10.0];
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    workbook.save(output_path)?;
    info!("📊 [EXCEL] 已写入 {} 行到 {:?}", rows.len(), output_path);
    Ok(rows.len())
}
