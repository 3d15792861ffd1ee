/// 对比槽位状态
///
/// 最多四个槽位，每个槽位独占自己的结果状态。每次发起比较时槽位的代号（generation）递增，
/// 请求完成时携带发起时的代号，代号不一致的迟到响应直接丢弃，不会覆盖新的状态。

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::TransceiverResults;
use crate::utils::error::{AppError, AppResult};

/// 槽位结果状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum SlotStatus {
    /// 未参与比较
    Idle,
    /// 正在获取并组装
    Loading,
    /// 报告已就绪
    Ready(TransceiverResults),
    /// 组装失败，结果已清空
    Failed(AppError),
}

impl Default for SlotStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// 单个槽位
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSlot {
    /// 选择框中当前选中的收发器
    pub selected_id: Option<String>,
    /// 最近一次比较时快照下来的收发器
    pub active_id: Option<String>,
    /// 请求代号
    pub generation: u64,
    pub status: SlotStatus,
}

impl ComparisonSlot {
    pub fn results(&self) -> Option<&TransceiverResults> {
        match &self.status {
            SlotStatus::Ready(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match &self.status {
            SlotStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SlotStatus::Loading)
    }
}

/// 一次组装请求的凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub slot: usize,
    pub generation: u64,
    pub transceiver_id: String,
}

/// 全部对比槽位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSlots {
    slots: Vec<ComparisonSlot>,
}

impl ComparisonSlots {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![ComparisonSlot::default(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ComparisonSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> AppResult<&ComparisonSlot> {
        self.slots
            .get(index)
            .ok_or_else(|| AppError::validation_error(format!("无效的槽位: {}，共 {} 个槽位", index, self.slots.len())))
    }

    /// 修改某个槽位的选择，空字符串视为清空
    pub fn select(&mut self, index: usize, transceiver_id: Option<String>) -> AppResult<()> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| AppError::validation_error(format!("无效的槽位: {}，共 {} 个槽位", index, count)))?;
        slot.selected_id = transceiver_id.filter(|id| !id.is_empty());
        Ok(())
    }

    pub fn selected_ids(&self) -> Vec<Option<String>> {
        self.slots.iter().map(|s| s.selected_id.clone()).collect()
    }

    pub fn has_any_selection(&self) -> bool {
        self.slots.iter().any(|s| s.selected_id.is_some())
    }

    /// 是否存在进行中的比较（导出按钮的启用条件）
    pub fn has_comparison(&self) -> bool {
        self.slots.iter().any(|s| s.active_id.is_some())
    }

    /// 将当前选择快照为比较集合，为每个非空槽位签发请求凭据
    ///
    /// 所有槽位的代号都会递增，之前发出的请求全部作废
    pub fn begin_comparison(&mut self) -> Vec<RequestTicket> {
        let mut tickets = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.generation += 1;
            slot.active_id = slot.selected_id.clone();
            match &slot.active_id {
                Some(id) => {
                    slot.status = SlotStatus::Loading;
                    tickets.push(RequestTicket {
                        slot: index,
                        generation: slot.generation,
                        transceiver_id: id.clone(),
                    });
                }
                None => slot.status = SlotStatus::Idle,
            }
        }
        tickets
    }

    /// 应用请求结果，代号过期时丢弃并返回 false
    pub fn apply(&mut self, ticket: &RequestTicket, outcome: AppResult<TransceiverResults>) -> bool {
        let Some(slot) = self.slots.get_mut(ticket.slot) else {
            warn!("[SLOTS] 丢弃结果: 槽位 {} 不存在", ticket.slot);
            return false;
        };

        if slot.generation != ticket.generation {
            debug!(
                "[SLOTS] 丢弃过期结果: 槽位 {} 收发器 {} (请求代号 {}, 当前代号 {})",
                ticket.slot, ticket.transceiver_id, ticket.generation, slot.generation
            );
            return false;
        }

        slot.status = match outcome {
            Ok(results) => SlotStatus::Ready(results),
            Err(err) => SlotStatus::Failed(err),
        };
        true
    }

    /// 已就绪的报告，按槽位顺序
    pub fn resolved_results(&self) -> Vec<TransceiverResults> {
        self.slots
            .iter()
            .filter_map(|s| s.results().cloned())
            .collect()
    }
}
