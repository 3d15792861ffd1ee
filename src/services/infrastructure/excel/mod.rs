/// Excel 导出相关模块

pub mod excel_report_writer;

pub use excel_report_writer::{grade_fill_color, write_results_workbook};
