//! 集成测试共用的数据集

#![allow(dead_code)]

use std::path::Path;

pub const TRANSCEIVERS_JSON: &str = r#"[
  {"id": "t-200", "name": "SFP28 25G LR", "manufacturer": "Fiber, Inc.", "type": "SFP28", "created_at": "2024-03-01T08:00:00Z"},
  {"id": "t-100", "name": "QSFP-DD 400G SR8", "manufacturer": "Acme", "type": "QSFP-DD"}
]"#;

/// Power 的 display_order 比 Signal Integrity 小，报告中排在前面
pub const CATEGORIES_JSON: &str = r#"[
  {"id": "c-sig", "name": "Signal Integrity", "description": "Eye and jitter", "display_order": 1},
  {"id": "c-pwr", "name": "Power", "description": "Supply checks", "display_order": 0}
]"#;

pub const TEST_CASES_JSON: &str = r#"[
  {"id": "tc-eye", "category_id": "c-sig", "name": "Eye Height", "description": "", "pass_criteria": ">= 100mV", "display_order": 1},
  {"id": "tc-draw", "category_id": "c-pwr", "name": "Supply Draw", "description": "", "pass_criteria": "<= 3.5W", "display_order": 0},
  {"id": "tc-jitter", "category_id": "c-sig", "name": "Jitter", "description": "", "pass_criteria": "<= 0.15UI", "display_order": 0}
]"#;

/// t-100 的结果；t-200 没有结果资源
pub const RESULTS_T100_JSON: &str = r#"[
  {"test_case_id": "tc-jitter", "passed": true, "value": "0.12UI", "notes": null},
  {"test_case_id": "tc-eye", "passed": true, "value": "120mV", "notes": "nominal"},
  {"test_case_id": "tc-draw", "passed": false, "value": "3.5W, peak", "notes": null}
]"#;

pub const HEADER: &str = "Transceiver,Manufacturer,Type,Category,Test,Status,Value,Grade,Pass Rate";

pub const T100_ROWS: [&str; 4] = [
    "QSFP-DD 400G SR8,Acme,QSFP-DD,Power,Supply Draw,FAIL,\"3.5W, peak\",F,0%",
    "QSFP-DD 400G SR8,Acme,QSFP-DD,Signal Integrity,Jitter,PASS,0.12UI,A,100%",
    "QSFP-DD 400G SR8,Acme,QSFP-DD,Signal Integrity,Eye Height,PASS,120mV,A,100%",
    "QSFP-DD 400G SR8,Acme,QSFP-DD,OVERALL,,,,C,67%",
];

pub const T200_ROWS: [&str; 4] = [
    "SFP28 25G LR,\"Fiber, Inc.\",SFP28,Power,Supply Draw,NOT TESTED,,F,0%",
    "SFP28 25G LR,\"Fiber, Inc.\",SFP28,Signal Integrity,Jitter,NOT TESTED,,F,0%",
    "SFP28 25G LR,\"Fiber, Inc.\",SFP28,Signal Integrity,Eye Height,NOT TESTED,,F,0%",
    "SFP28 25G LR,\"Fiber, Inc.\",SFP28,OVERALL,,,,F,0%",
];

/// 把数据集写入目录，文件名与默认资源名一致
pub fn write_dataset(dir: &Path) {
    std::fs::write(dir.join("transceivers.json"), TRANSCEIVERS_JSON).unwrap();
    std::fs::write(dir.join("test-categories.json"), CATEGORIES_JSON).unwrap();
    std::fs::write(dir.join("test-cases.json"), TEST_CASES_JSON).unwrap();
    std::fs::write(dir.join("test-results-t-100.json"), RESULTS_T100_JSON).unwrap();
}
