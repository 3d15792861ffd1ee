/// 领域服务层模块
/// 包含评分、报告组装、导出格式化等纯业务逻辑

/// 评分引擎 - 通过率与字母等级
pub mod grading;

/// 报告组装器 - 将原始集合组装为单个收发器的分级报告
pub mod result_assembler;

/// 导出格式化 - 报告展开为扁平表格与CSV文本
pub mod export_formatter;

/// 时间源 - 组装与导出使用的注入时钟
pub mod clock;

/// 对比槽位 - 带代号的槽位状态，丢弃过期响应
pub mod comparison_slots;

// 重新导出常用类型
pub use grading::{
    calculate_category_grade, calculate_grade, calculate_pass_rate,
    GRADE_A_THRESHOLD, GRADE_B_THRESHOLD, GRADE_C_THRESHOLD, GRADE_D_THRESHOLD,
};
pub use result_assembler::assemble_results;
pub use export_formatter::{
    build_export_rows, escape_csv_field, format_results_for_export, ExportRow, EXPORT_COLUMNS, OVERALL_MARKER,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use comparison_slots::{ComparisonSlot, ComparisonSlots, RequestTicket, SlotStatus};
