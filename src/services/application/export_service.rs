/// 导出服务
///
/// 将已就绪的报告写成带时间戳的下载文件。导出只使用内存中的报告，不会重新获取数据。
/// 没有报告时返回 `EmptyExport` 提示，不生成文件；写入失败统一转换为 `ExportFailure`。

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::models::{ExportFormat, TransceiverResults};
use crate::services::domain::{build_export_rows, format_results_for_export, Clock};
use crate::services::infrastructure::write_results_workbook;
use crate::utils::config::ExportConfig;
use crate::utils::error::{AppError, AppResult};
use crate::utils::time_utils::timestamped_file_name;

/// 导出结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub format: ExportFormat,
    pub content_type: String,
    /// 数据行数（不含表头）
    pub row_count: usize,
}

/// 导出服务接口
#[async_trait]
pub trait IExportService: Send + Sync {
    /// 导出为 CSV
    async fn export_to_csv(&self, results: &[TransceiverResults]) -> AppResult<ExportedFile>;

    /// 导出为 Excel 工作簿
    async fn export_to_excel(&self, results: &[TransceiverResults]) -> AppResult<ExportedFile>;

    /// 按格式导出
    async fn export(&self, results: &[TransceiverResults], format: ExportFormat) -> AppResult<ExportedFile> {
        match format {
            ExportFormat::Csv => self.export_to_csv(results).await,
            ExportFormat::Xlsx => self.export_to_excel(results).await,
        }
    }
}

pub struct FileExportService {
    config: ExportConfig,
    clock: Arc<dyn Clock>,
}

impl FileExportService {
    pub fn new(config: ExportConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// 校验输入并准备输出路径
    async fn prepare(&self, results: &[TransceiverResults], format: ExportFormat) -> AppResult<(String, PathBuf)> {
        if results.is_empty() {
            warn!("[EXPORT] 没有可导出的报告");
            return Err(AppError::EmptyExport);
        }

        tokio::fs::create_dir_all(&self.config.output_dir).await.map_err(|e| {
            crate::log_export_failure!("创建导出目录 {:?} 失败: {}", self.config.output_dir, e);
            AppError::export_failure(format!("创建导出目录失败: {}", e))
        })?;

        let file_name = timestamped_file_name(&self.config.file_prefix, self.clock.now(), format.extension());
        let path = self.config.output_dir.join(&file_name);
        Ok((file_name, path))
    }
}

#[async_trait]
impl IExportService for FileExportService {
    async fn export_to_csv(&self, results: &[TransceiverResults]) -> AppResult<ExportedFile> {
        let (file_name, path) = self.prepare(results, ExportFormat::Csv).await?;

        let content = format_results_for_export(results);
        let row_count = build_export_rows(results).len();

        tokio::fs::write(&path, content).await.map_err(|e| {
            crate::log_export_failure!("写入 {:?} 失败: {}", path, e);
            AppError::export_failure(format!("写入CSV文件失败: {}", e))
        })?;

        info!("📄 [EXPORT] CSV 已导出: {:?} ({} 行)", path, row_count);
        Ok(ExportedFile {
            path,
            file_name,
            format: ExportFormat::Csv,
            content_type: ExportFormat::Csv.content_type().to_string(),
            row_count,
        })
    }

    async fn export_to_excel(&self, results: &[TransceiverResults]) -> AppResult<ExportedFile> {
        let (file_name, path) = self.prepare(results, ExportFormat::Xlsx).await?;

        let row_count = write_results_workbook(results, &path).map_err(|e| {
            crate::log_export_failure!("写入 {:?} 失败: {}", path, e);
            AppError::export_failure(format!("写入Excel文件失败: {}", e))
        })?;

        info!("📊 [EXPORT] Excel 已导出: {:?} ({} 行)", path, row_count);
        Ok(ExportedFile {
            path,
            file_name,
            format: ExportFormat::Xlsx,
            content_type: ExportFormat::Xlsx.content_type().to_string(),
            row_count,
        })
    }
}
