/// 对比相关命令
///
/// 包括收发器列表、槽位选择、发起比较和目录重新加载

use log::{error, info};
use serde::Serialize;

use crate::models::Transceiver;
use crate::services::domain::ComparisonSlot;
use crate::AppState;

/// 槽位状态快照
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSnapshot {
    pub slots: Vec<ComparisonSlot>,
    pub has_any_selection: bool,
    /// 为 true 时允许导出
    pub has_comparison: bool,
}

async fn snapshot(state: &AppState) -> ComparisonSnapshot {
    let slots = state.slots.lock().await;
    ComparisonSnapshot {
        slots: slots.slots().to_vec(),
        has_any_selection: slots.has_any_selection(),
        has_comparison: slots.has_comparison(),
    }
}

/// 获取收发器列表（按名称排序）
pub async fn get_transceivers(state: &AppState) -> Result<Vec<Transceiver>, String> {
    state.comparison_service.list_transceivers().await.map_err(|e| {
        error!("获取收发器列表失败: {}", e);
        e.to_string()
    })
}

/// 设置某个槽位的选择，`None` 表示清空
pub async fn select_transceiver(
    state: &AppState,
    slot: usize,
    transceiver_id: Option<String>,
) -> Result<Vec<Option<String>>, String> {
    let mut slots = state.slots.lock().await;
    slots.select(slot, transceiver_id.clone()).map_err(|e| e.to_string())?;
    crate::log_user_operation!("槽位 {} 选择: {}", slot, transceiver_id.as_deref().unwrap_or("(无)"));
    Ok(slots.selected_ids())
}

/// 以当前选择发起比较
///
/// 各槽位并发组装，失败只影响所在槽位；组装期间槽位锁不被持有，
/// 期间再次发起的比较会让本轮结果作为过期响应被丢弃
pub async fn compare_selected(state: &AppState) -> Result<ComparisonSnapshot, String> {
    let tickets = {
        let mut slots = state.slots.lock().await;
        if !slots.has_any_selection() {
            return Err("请至少选择一个收发器".to_string());
        }
        slots.begin_comparison()
    };
    crate::log_user_operation!("发起比较: {} 个收发器", tickets.len());

    let outcomes = state.comparison_service.run_tickets(tickets).await;

    {
        let mut slots = state.slots.lock().await;
        let applied = outcomes
            .into_iter()
            .map(|(ticket, outcome)| slots.apply(&ticket, outcome))
            .filter(|applied| *applied)
            .count();
        info!("[COMPARE] 已应用 {} 个槽位结果", applied);
    }

    Ok(snapshot(state).await)
}

/// 当前槽位状态
pub async fn get_comparison_state(state: &AppState) -> Result<ComparisonSnapshot, String> {
    Ok(snapshot(state).await)
}

/// 重新加载测试目录（测试类别与测试用例）
pub async fn reload_catalog(state: &AppState) -> Result<(), String> {
    state.comparison_service.reload_catalog().await;
    crate::log_user_operation!("重新加载测试目录");
    Ok(())
}
