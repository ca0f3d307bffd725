//! # Stock Calculation Engine
//!
//! 盤點差異、預調酒成本與補貨規劃的核心計算引擎

pub mod dedupe;
pub mod premix;
pub mod reconciliation;
pub mod reorder;

// Re-export 主要類型
pub use dedupe::dedupe_products_by_name;
pub use premix::{IngredientDraw, PremixCalculator, PremixCostResult};
pub use reconciliation::ReconciliationCalculator;
pub use reorder::{ReorderOutcome, ReorderPlan, ReorderPlanner, ReorderPolicy};

/// 計算警告
///
/// 可恢復的部分性問題（缺少成分、成分瓶容量無效等）以警告回報，
/// 計算繼續進行，不作為錯誤向外拋出。
#[derive(Debug, Clone)]
pub struct CalcWarning {
    pub product_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl CalcWarning {
    pub fn new(product_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Info)
    }

    pub fn warning(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Warning)
    }

    pub fn error(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
