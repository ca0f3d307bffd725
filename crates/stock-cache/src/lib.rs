//! # Stock Cache
//!
//! 持久層協作端使用的產品快取模組

pub mod product_cache;

// Re-export 主要類型
pub use product_cache::ProductCache;
