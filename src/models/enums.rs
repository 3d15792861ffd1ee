//! # 模型枚举类型模块
//!
//! ## 业务作用
//! 本模块定义了对比系统中使用的枚举类型：
//! - **等级枚举**: A–F 五档字母等级
//! - **测试状态枚举**: 导出和展示时使用的 PASS / FAIL / NOT TESTED
//! - **数据源类型**: HTTP 或本地目录
//! - **导出格式**: CSV 或 Excel
//!
//! 所有枚举都支持JSON序列化以及与字符串的双向转换。

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// 字母等级
///
/// 仅由通过率决定，阈值见 `services::domain::grading`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// 等级的字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self::F
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            _ => Err(format!("Invalid Grade: {}", s)),
        }
    }
}

/// 单个测试用例的结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// 已测试且通过
    #[serde(rename = "PASS")]
    Passed,
    /// 已测试但失败
    #[serde(rename = "FAIL")]
    Failed,
    /// 没有测试结果
    #[serde(rename = "NOT TESTED")]
    NotTested,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASS",
            TestStatus::Failed => "FAIL",
            TestStatus::NotTested => "NOT TESTED",
        }
    }
}

impl Display for TestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(TestStatus::Passed),
            "FAIL" => Ok(TestStatus::Failed),
            "NOT TESTED" => Ok(TestStatus::NotTested),
            _ => Err(format!("Invalid TestStatus: {}", s)),
        }
    }
}

/// 数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// 通过 HTTP GET 获取静态 JSON 资源
    Http,
    /// 从本地目录读取同名 JSON 文件
    Directory,
}

impl Default for DataSourceKind {
    fn default() -> Self {
        Self::Http
    }
}

impl Display for DataSourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataSourceKind::Http => "http",
            DataSourceKind::Directory => "directory",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(DataSourceKind::Http),
            "directory" | "dir" => Ok(DataSourceKind::Directory),
            _ => Err(format!("Invalid DataSourceKind: {}", s)),
        }
    }
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// 下载时使用的内容类型
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Csv
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(format!("Invalid ExportFormat: {}", s)),
        }
    }
}
