/// 导出相关命令
///
/// 只有存在进行中的比较时才允许导出，导出内容为当前已就绪的报告

use log::error;

use crate::models::ExportFormat;
use crate::services::ExportedFile;
use crate::utils::error::AppError;
use crate::AppState;

/// 按格式导出当前比较结果
pub async fn export_comparison(state: &AppState, format: ExportFormat) -> Result<ExportedFile, String> {
    let results = {
        let slots = state.slots.lock().await;
        if !slots.has_comparison() {
            return Err(AppError::EmptyExport.to_string());
        }
        slots.resolved_results()
    };

    crate::log_user_operation!("导出 {} 份报告为 {}", results.len(), format);
    state.export_service.export(&results, format).await.map_err(|e| {
        error!("导出失败: {}", e);
        e.to_string()
    })
}

/// 导出当前比较结果为 CSV
pub async fn export_comparison_csv(state: &AppState) -> Result<ExportedFile, String> {
    export_comparison(state, ExportFormat::Csv).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::commands::comparison_commands::{compare_selected, select_transceiver};
    use crate::commands::test_support::{mock_source, state_with};

    #[tokio::test]
    async fn test_export_disabled_without_comparison() {
        let dir = TempDir::new().unwrap();
        let state = state_with(mock_source(), &dir);

        select_transceiver(&state, 0, Some("t1".to_string())).await.unwrap();
        let err = export_comparison_csv(&state).await.unwrap_err();
        assert_eq!(err, AppError::EmptyExport.to_string());
    }

    #[tokio::test]
    async fn test_export_only_resolved_reports() {
        let dir = TempDir::new().unwrap();
        let state = state_with(mock_source(), &dir);

        select_transceiver(&state, 0, Some("t2".to_string())).await.unwrap();
        select_transceiver(&state, 1, Some("missing".to_string())).await.unwrap();
        select_transceiver(&state, 3, Some("t1".to_string())).await.unwrap();
        compare_selected(&state).await.unwrap();

        let exported = export_comparison_csv(&state).await.unwrap();
        let content = std::fs::read_to_string(&exported.path).unwrap();
        let lines: Vec<&str> = content.split('\n').collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "Beta,Acme,SFP28,Optical,Tx Power,FAIL,-1.2 dBm,F,0%");
        assert_eq!(lines[2], "Beta,Acme,SFP28,OVERALL,,,,F,0%");
        assert_eq!(lines[3], "Alpha,Acme,QSFP28,Optical,Tx Power,PASS,-1.2 dBm,A,100%");
        assert_eq!(lines[4], "Alpha,Acme,QSFP28,OVERALL,,,,A,100%");
    }

    /// 比较存在但所有槽位都失败时提示没有可导出的内容
    #[tokio::test]
    async fn test_export_with_only_failed_slots_is_empty() {
        let dir = TempDir::new().unwrap();
        let state = state_with(mock_source(), &dir);

        select_transceiver(&state, 0, Some("missing".to_string())).await.unwrap();
        compare_selected(&state).await.unwrap();

        let err = export_comparison(&state, ExportFormat::Xlsx).await.unwrap_err();
        assert_eq!(err, AppError::EmptyExport.to_string());
    }
}
