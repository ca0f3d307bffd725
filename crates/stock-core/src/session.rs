//! 盤點場次模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numeric::decimal_or;
use crate::product::Product;

/// 盤點明細（單一產品在單一場次內的記錄）
///
/// 所有數量欄位皆為可選：盤點是逐步輸入的資料，
/// 未填寫的欄位以 0 計算，不中斷場次。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLine {
    /// 產品ID
    pub product_id: String,

    /// 期初庫存（毫升）
    pub start_stock_ml: Option<Decimal>,

    /// 場次內進貨量（毫升）
    pub purchases_ml: Option<Decimal>,

    /// 場次內銷售杯數（份數，非容量）
    pub sales_portions: Option<Decimal>,

    /// 實際盤點期末庫存（毫升）
    pub end_stock_ml: Option<Decimal>,
}

impl SessionLine {
    /// 創建新的盤點明細
    pub fn new(product_id: String) -> Self {
        Self {
            product_id,
            start_stock_ml: None,
            purchases_ml: None,
            sales_portions: None,
            end_stock_ml: None,
        }
    }

    /// 建構器模式：設置期初庫存
    pub fn with_start_stock(mut self, ml: Decimal) -> Self {
        self.start_stock_ml = Some(ml);
        self
    }

    /// 建構器模式：設置進貨量
    pub fn with_purchases(mut self, ml: Decimal) -> Self {
        self.purchases_ml = Some(ml);
        self
    }

    /// 建構器模式：設置銷售杯數
    pub fn with_sales(mut self, portions: Decimal) -> Self {
        self.sales_portions = Some(portions);
        self
    }

    /// 建構器模式：設置期末庫存
    pub fn with_end_stock(mut self, ml: Decimal) -> Self {
        self.end_stock_ml = Some(ml);
        self
    }

    /// 期初庫存（未填寫視為 0）
    pub fn start_stock(&self) -> Decimal {
        decimal_or(self.start_stock_ml, Decimal::ZERO)
    }

    /// 進貨量（未填寫視為 0）
    pub fn purchases(&self) -> Decimal {
        decimal_or(self.purchases_ml, Decimal::ZERO)
    }

    /// 銷售杯數（未填寫視為 0）
    pub fn sales(&self) -> Decimal {
        decimal_or(self.sales_portions, Decimal::ZERO)
    }

    /// 期末庫存（未填寫視為 0）
    pub fn end_stock(&self) -> Decimal {
        decimal_or(self.end_stock_ml, Decimal::ZERO)
    }
}

/// 盤點明細的推算結果（由計算引擎產出，非輸入資料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineCalculation {
    /// 理論期末庫存（毫升）
    pub theoretical_end_stock_ml: Decimal,

    /// 差異量（毫升；正值為盤盈，負值為損耗）
    pub difference_volume_ml: Decimal,

    /// 差異金額
    pub difference_money: Decimal,

    /// 差異百分比（以銷售量為分母）
    pub difference_percent: Decimal,
}

impl LineCalculation {
    /// 全零結果（找不到產品檔時使用）
    pub fn zero() -> Self {
        Self {
            theoretical_end_stock_ml: Decimal::ZERO,
            difference_volume_ml: Decimal::ZERO,
            difference_money: Decimal::ZERO,
            difference_percent: Decimal::ZERO,
        }
    }
}

/// 盤點場次狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// 進行中（明細可編輯）
    Open,
    /// 已完成（明細不再變更）
    Completed,
}

/// 盤點場次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountingSession {
    /// 場次ID
    pub id: Uuid,

    /// 盤點日期
    pub opened_on: NaiveDate,

    /// 場次狀態
    pub status: SessionStatus,

    /// 盤點明細（每個啟用產品一筆）
    pub lines: Vec<SessionLine>,
}

impl CountingSession {
    /// 開始新的盤點場次：為每個啟用產品建立一筆明細
    pub fn start(opened_on: NaiveDate, products: &[Product]) -> Self {
        let lines = products
            .iter()
            .filter(|p| p.is_active)
            .map(|p| SessionLine::new(p.id.clone()))
            .collect();

        Self {
            id: Uuid::new_v4(),
            opened_on,
            status: SessionStatus::Open,
            lines,
        }
    }

    /// 標記場次完成
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
    }

    /// 檢查場次是否仍可編輯
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }
}
