//! # barstock
//!
//! 酒吧盤點對帳與成本計算引擎：盤點差異、預調酒成本與配方展開、
//! 重複品項合併、節假日感知補貨規劃。純同步計算層，不含任何 I/O。

pub use stock_cache;
pub use stock_calc;
pub use stock_core;
