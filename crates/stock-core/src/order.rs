//! 採購單草稿模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 採購單草稿明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLine {
    /// 產品ID
    pub product_id: String,

    /// 建議訂購數量（瓶）
    pub quantity: Decimal,

    /// 單位成本估計（取當前每瓶成本）
    pub cost_per_item: Decimal,
}

impl DraftLine {
    /// 創建新的草稿明細
    pub fn new(product_id: String, quantity: Decimal, cost_per_item: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            cost_per_item,
        }
    }

    /// 明細金額估計
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.cost_per_item
    }
}

/// 採購單草稿（補貨規劃結果，持久化由呼叫端負責）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderDraft {
    /// 草稿ID
    pub id: Uuid,

    /// 供應商ID
    pub supplier_id: String,

    /// 草稿明細
    pub lines: Vec<DraftLine>,
}

impl PurchaseOrderDraft {
    /// 創建新的採購單草稿
    pub fn new(supplier_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            supplier_id,
            lines: Vec::new(),
        }
    }

    /// 添加明細
    pub fn add_line(&mut self, line: DraftLine) {
        self.lines.push(line);
    }

    /// 草稿總金額估計
    pub fn total_cost(&self) -> Decimal {
        self.lines.iter().map(DraftLine::line_total).sum()
    }
}
