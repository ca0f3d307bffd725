//! 節假日感知補貨規劃

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use stock_core::{DraftLine, HolidayCalendar, Product, PurchaseOrderDraft, SessionLine};

/// 補貨策略參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderPolicy {
    /// 節前視窗（天）：今天起算多少天內有節假日就套用乘數
    pub holiday_window_days: u32,

    /// 節假日乘數：套用於本次規劃的所有建議數量
    pub holiday_multiplier: Decimal,
}

impl Default for ReorderPolicy {
    fn default() -> Self {
        Self {
            holiday_window_days: 5,
            holiday_multiplier: Decimal::from(2),
        }
    }
}

/// 補貨規劃結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderPlan {
    /// 採購單草稿（每個供應商一張，依供應商ID排序）
    pub orders: Vec<PurchaseOrderDraft>,

    /// 觸發補貨但未指派供應商的產品ID（回報而非靜默丟棄）
    pub skipped_without_supplier: Vec<String>,

    /// 本次套用的節假日名稱（無則為 None，乘數 ×1）
    pub holiday: Option<String>,

    /// 本次套用的乘數
    pub multiplier: Decimal,
}

/// 補貨規劃結果的外層區分
///
/// 「沒有產品需要補貨」是一等業務結果，呼叫端必須能把它
/// 與「已建立草稿」及真正的輸入錯誤區分開。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReorderOutcome {
    /// 沒有任何產品低於補貨門檻
    NoReorderNeeded,

    /// 已產生補貨規劃（可能包含未指派供應商的跳過清單）
    Planned(ReorderPlan),
}

/// 補貨規劃器
pub struct ReorderPlanner {
    /// 節假日日曆
    calendar: HolidayCalendar,

    /// 策略參數
    policy: ReorderPolicy,
}

impl ReorderPlanner {
    /// 創建新的規劃器（使用預設策略：5 天視窗、乘數 ×2）
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self {
            calendar,
            policy: ReorderPolicy::default(),
        }
    }

    /// 建構器模式：設置策略參數
    pub fn with_policy(mut self, policy: ReorderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 由盤點明細產生採購單草稿
    ///
    /// `today` 由呼叫端傳入（不讀系統時鐘），整次規劃共用同一個乘數。
    /// 未設定補貨門檻與數量的產品視為未啟用自動化，跳過；
    /// 期末庫存低於門檻的產品建議數量為 `ceil(補貨數量 × 乘數)`。
    /// 觸發但查無供應商指派的產品收進 `skipped_without_supplier`。
    pub fn plan(
        &self,
        today: NaiveDate,
        lines: &[SessionLine],
        products_by_id: &HashMap<String, Product>,
        supplier_assignment: &HashMap<String, String>,
    ) -> ReorderOutcome {
        let holiday = self
            .calendar
            .upcoming_holiday(today, self.policy.holiday_window_days)
            .map(str::to_owned);

        let multiplier = match &holiday {
            Some(name) => {
                tracing::info!(
                    "節假日 {} 在 {} 天視窗內，補貨數量乘以 {}",
                    name,
                    self.policy.holiday_window_days,
                    self.policy.holiday_multiplier
                );
                self.policy.holiday_multiplier
            }
            None => Decimal::ONE,
        };

        let mut orders_by_supplier: HashMap<String, PurchaseOrderDraft> = HashMap::new();
        let mut skipped_without_supplier = Vec::new();
        let mut triggered = 0usize;

        for line in lines {
            let Some(product) = products_by_id.get(&line.product_id) else {
                tracing::debug!("明細指向未知產品，跳過: {}", line.product_id);
                continue;
            };

            // 門檻與數量都沒設定 = 未啟用補貨自動化
            if !product.has_reorder_automation() {
                continue;
            }

            let Some(threshold) = product.reorder_threshold_ml else {
                continue;
            };

            if line.end_stock() >= threshold {
                continue;
            }

            triggered += 1;
            let base_quantity = product.reorder_quantity.unwrap_or(Decimal::ZERO);
            let quantity = (base_quantity * multiplier).ceil();

            match supplier_assignment.get(&product.id) {
                Some(supplier_id) => {
                    orders_by_supplier
                        .entry(supplier_id.clone())
                        .or_insert_with(|| PurchaseOrderDraft::new(supplier_id.clone()))
                        .add_line(DraftLine::new(
                            product.id.clone(),
                            quantity,
                            product.cost_per_bottle,
                        ));
                }
                None => {
                    tracing::warn!("產品 {} 需要補貨但未指派供應商", product.id);
                    skipped_without_supplier.push(product.id.clone());
                }
            }
        }

        if triggered == 0 {
            tracing::info!("沒有產品低於補貨門檻");
            return ReorderOutcome::NoReorderNeeded;
        }

        // HashMap 迭代順序不定，輸出依供應商ID排序保持穩定
        let mut orders: Vec<PurchaseOrderDraft> = orders_by_supplier.into_values().collect();
        orders.sort_by(|a, b| a.supplier_id.cmp(&b.supplier_id));

        tracing::info!(
            "補貨規劃完成：草稿 {} 張，未指派供應商 {} 筆",
            orders.len(),
            skipped_without_supplier.len()
        );

        ReorderOutcome::Planned(ReorderPlan {
            orders,
            skipped_without_supplier,
            holiday,
            multiplier,
        })
    }
}
