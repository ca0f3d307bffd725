//! # Stock Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod numeric;
pub mod order;
pub mod product;
pub mod session;

// Re-export 主要類型
pub use calendar::{Holiday, HolidayCalendar};
pub use order::{DraftLine, PurchaseOrderDraft};
pub use product::{CostMode, PremixIngredient, Product, ProductCategory};
pub use session::{CountingSession, LineCalculation, SessionLine, SessionStatus};

/// 盤點引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("產品不是預調酒: {0}")]
    NotAPremix(String),

    #[error("無效的瓶容量: {0}")]
    InvalidBottleVolume(String),

    #[error("找不到產品: {0}")]
    ProductNotFound(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StockError>;
