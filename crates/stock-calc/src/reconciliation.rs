//! 盤點差異計算

use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use stock_core::numeric::safe_div;
use stock_core::{LineCalculation, Product, SessionLine};

/// 盤點差異計算器
pub struct ReconciliationCalculator;

impl ReconciliationCalculator {
    /// 計算單筆盤點明細的推算欄位
    ///
    /// 理論期末庫存 = 期初 + 進貨 − 銷售杯數 × 每份容量。
    /// 找不到產品檔時四個欄位全為零。所有未填寫的數量視為 0，
    /// 負的期初庫存照實參與運算，不做截斷。
    pub fn calculate_line(line: &SessionLine, product: Option<&Product>) -> LineCalculation {
        let Some(product) = product else {
            return LineCalculation::zero();
        };

        let theoretical_end_stock =
            line.start_stock() + line.purchases() - line.sales() * product.portion_volume_ml;

        let difference_volume = line.end_stock() - theoretical_end_stock;

        // 瓶容量為零時每毫升成本為零，差異金額自然歸零
        let difference_money = difference_volume * product.cost_per_ml();

        // 差異百分比以銷售量為分母：沒有銷售（或每份容量為零）就沒有
        // 有意義的分母，一律回報 0
        let volume_sold = line.sales() * product.portion_volume_ml;
        let difference_percent = if volume_sold.is_zero() {
            Decimal::ZERO
        } else {
            safe_div(difference_volume, volume_sold) * Decimal::ONE_HUNDRED
        };

        LineCalculation {
            theoretical_end_stock_ml: theoretical_end_stock,
            difference_volume_ml: difference_volume,
            difference_money,
            difference_percent,
        }
    }

    /// 計算整個場次的所有明細
    ///
    /// 每筆明細相互獨立且不改動輸入，可安全平行計算。
    /// 輸出順序與輸入明細順序一致。
    pub fn calculate_session(
        lines: &[SessionLine],
        products_by_id: &HashMap<String, Product>,
    ) -> Vec<LineCalculation> {
        tracing::debug!("盤點差異計算：明細 {} 筆", lines.len());

        lines
            .par_iter()
            .map(|line| Self::calculate_line(line, products_by_id.get(&line.product_id)))
            .collect()
    }

    /// 取出損耗金額最大的前 n 筆明細索引
    ///
    /// 提供給敘事分析協作端的損耗排行，只含差異金額為負的明細。
    pub fn top_losses(calculations: &[LineCalculation], n: usize) -> Vec<usize> {
        let mut loss_indices: Vec<usize> = calculations
            .iter()
            .enumerate()
            .filter(|(_, calc)| calc.difference_money < Decimal::ZERO)
            .map(|(idx, _)| idx)
            .collect();

        loss_indices.sort_by(|&a, &b| {
            calculations[a]
                .difference_money
                .cmp(&calculations[b].difference_money)
        });
        loss_indices.truncate(n);
        loss_indices
    }
}
