//! 預調酒成本與配方展開計算

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use stock_core::numeric::{round_half_up_ml, safe_div};
use stock_core::{CostMode, Product, Result, StockError};

use crate::CalcWarning;

/// 預調酒成本計算結果
///
/// 缺少成分或成分瓶容量無效屬於可恢復問題：跳過該成分、
/// 累計部分成本並以警告回報，不中斷整體計算。
#[derive(Debug, Clone)]
pub struct PremixCostResult {
    /// 累計成本（僅含找得到且有效的成分）
    pub cost: Decimal,

    /// 警告信息
    pub warnings: Vec<CalcWarning>,
}

/// 配方展開輸出：單一成分的取用量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDraw {
    /// 成分產品ID
    pub product_id: String,

    /// 取用量（毫升，整數）
    pub volume_ml: Decimal,
}

/// 預調酒計算器
pub struct PremixCalculator;

impl PremixCalculator {
    /// 計算預調酒每瓶成本
    ///
    /// 非預調酒（或沒有配方列表）直接回傳其設定成本；
    /// 配方列表存在但為空的預調酒沒有可推算的成本，回傳 0。
    pub fn calculate_cost(
        premix: &Product,
        ingredient_products_by_id: &HashMap<String, Product>,
    ) -> PremixCostResult {
        let Some(ingredients) = premix
            .ingredients
            .as_ref()
            .filter(|_| premix.is_premix)
        else {
            return PremixCostResult {
                cost: premix.cost_per_bottle,
                warnings: Vec::new(),
            };
        };

        let mut cost = Decimal::ZERO;
        let mut warnings = Vec::new();

        for entry in ingredients {
            let Some(ingredient) = ingredient_products_by_id.get(&entry.product_id) else {
                tracing::warn!("預調酒 {} 缺少成分: {}", premix.id, entry.product_id);
                warnings.push(CalcWarning::warning(
                    entry.product_id.clone(),
                    format!("找不到成分產品: {}", entry.product_id),
                ));
                continue;
            };

            if ingredient.bottle_volume_ml.is_zero() {
                tracing::warn!(
                    "預調酒 {} 的成分 {} 瓶容量無效",
                    premix.id,
                    entry.product_id
                );
                warnings.push(CalcWarning::warning(
                    entry.product_id.clone(),
                    format!("成分瓶容量無效: {}", entry.product_id),
                ));
                continue;
            }

            cost += safe_div(ingredient.cost_per_bottle, ingredient.bottle_volume_ml)
                * entry.volume_ml;
        }

        PremixCostResult { cost, warnings }
    }

    /// 解析產品的有效每瓶成本
    ///
    /// 自動模式的預調酒由配方推算，其餘一律使用設定值。
    /// 其他子系統在把預調酒當一般產品處理之前先經過這裡。
    pub fn effective_cost(
        product: &Product,
        ingredient_products_by_id: &HashMap<String, Product>,
    ) -> Decimal {
        if product.is_premix && product.cost_mode == CostMode::Auto {
            Self::calculate_cost(product, ingredient_products_by_id).cost
        } else {
            product.cost_per_bottle
        }
    }

    /// 把取用量展開為各成分取用量
    ///
    /// 前置條件檢查失敗時以明確錯誤拒絕（不靜默回傳空結果）：
    /// 非預調酒或沒有配方列表為 [`StockError::NotAPremix`]，
    /// 自身瓶容量為零或負值為 [`StockError::InvalidBottleVolume`]。
    ///
    /// 取用量可以超過名義瓶容量（由呼叫端把關），按比例線性放大，
    /// 不做截斷；取用量 0 合法，輸出全為零。
    pub fn expand_to_ingredients(
        premix: &Product,
        draw_volume_ml: Decimal,
    ) -> Result<Vec<IngredientDraw>> {
        let Some(ingredients) = premix
            .ingredients
            .as_ref()
            .filter(|_| premix.is_premix)
        else {
            return Err(StockError::NotAPremix(premix.id.clone()));
        };

        if premix.bottle_volume_ml <= Decimal::ZERO {
            return Err(StockError::InvalidBottleVolume(premix.id.clone()));
        }

        let scale = draw_volume_ml / premix.bottle_volume_ml;

        Ok(ingredients
            .iter()
            .map(|entry| IngredientDraw {
                product_id: entry.product_id.clone(),
                volume_ml: round_half_up_ml(entry.volume_ml * scale),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stock_core::{PremixIngredient, ProductCategory};

    fn ingredient_product(id: &str, bottle_ml: i64, cost: i64) -> Product {
        Product::new(
            id.to_string(),
            id.to_string(),
            ProductCategory::Liqueur,
            Decimal::from(bottle_ml),
        )
        .with_cost_per_bottle(Decimal::from(cost))
    }

    fn negroni_mix() -> Product {
        Product::new(
            "MIX-NEGRONI".to_string(),
            "Negroni Mix".to_string(),
            ProductCategory::Premix,
            Decimal::from(1000),
        )
        .with_ingredients(vec![
            PremixIngredient::new("ING-1".to_string(), Decimal::from(600)),
            PremixIngredient::new("ING-2".to_string(), Decimal::from(400)),
        ])
    }

    fn lookup() -> HashMap<String, Product> {
        let mut map = HashMap::new();
        map.insert("ING-1".to_string(), ingredient_product("ING-1", 700, 1000));
        map.insert("ING-2".to_string(), ingredient_product("ING-2", 500, 500));
        map
    }

    #[test]
    fn test_premix_cost() {
        // 600×(1000/700) + 400×(500/500) ≈ 857.14 + 400 = 1257.14
        let result = PremixCalculator::calculate_cost(&negroni_mix(), &lookup());

        assert_eq!(result.cost.round_dp(2), "1257.14".parse().unwrap());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_cost_is_additive_over_ingredients() {
        let full = PremixCalculator::calculate_cost(&negroni_mix(), &lookup());

        // 移除一個成分：總成本剛好少掉該成分的貢獻，且不拋錯
        let mut partial_lookup = lookup();
        partial_lookup.remove("ING-2");
        let partial = PremixCalculator::calculate_cost(&negroni_mix(), &partial_lookup);

        let ing2_contribution = Decimal::from(400) * safe_div(Decimal::from(500), Decimal::from(500));
        assert_eq!(partial.cost, full.cost - ing2_contribution);
        assert_eq!(partial.warnings.len(), 1);
        assert_eq!(partial.warnings[0].product_id, "ING-2");
    }

    #[test]
    fn test_invalid_ingredient_bottle_volume_skipped() {
        let mut bad_lookup = lookup();
        bad_lookup.insert("ING-2".to_string(), ingredient_product("ING-2", 0, 500));

        let result = PremixCalculator::calculate_cost(&negroni_mix(), &bad_lookup);

        // 只剩 ING-1 的貢獻
        assert_eq!(
            result.cost,
            safe_div(Decimal::from(1000), Decimal::from(700)) * Decimal::from(600)
        );
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_non_premix_returns_stored_cost() {
        let plain = ingredient_product("GIN-700", 700, 900);
        let result = PremixCalculator::calculate_cost(&plain, &lookup());

        assert_eq!(result.cost, Decimal::from(900));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_ingredient_list_costs_zero() {
        // 配方列表存在但為空：與「非預調酒」不同，成本為 0 而非設定值
        let empty = Product::new(
            "MIX-EMPTY".to_string(),
            "Empty Mix".to_string(),
            ProductCategory::Premix,
            Decimal::from(1000),
        )
        .with_cost_per_bottle(Decimal::from(777))
        .with_ingredients(Vec::new());

        let result = PremixCalculator::calculate_cost(&empty, &lookup());
        assert_eq!(result.cost, Decimal::ZERO);
    }

    #[test]
    fn test_effective_cost_modes() {
        let auto = negroni_mix();
        assert_eq!(
            PremixCalculator::effective_cost(&auto, &lookup()).round_dp(2),
            "1257.14".parse().unwrap()
        );

        let manual = negroni_mix()
            .with_cost_mode(CostMode::Manual)
            .with_cost_per_bottle(Decimal::from(1500));
        assert_eq!(
            PremixCalculator::effective_cost(&manual, &lookup()),
            Decimal::from(1500)
        );
    }

    #[test]
    fn test_expand() {
        // 1000ml 瓶、600/400 配方，取 333ml：600×0.333=199.8→200、400×0.333=133.2→133
        let draws =
            PremixCalculator::expand_to_ingredients(&negroni_mix(), Decimal::from(333)).unwrap();

        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].volume_ml, Decimal::from(200));
        assert_eq!(draws[1].volume_ml, Decimal::from(133));
    }

    #[test]
    fn test_expand_zero_draw() {
        let draws =
            PremixCalculator::expand_to_ingredients(&negroni_mix(), Decimal::ZERO).unwrap();
        assert!(draws.iter().all(|d| d.volume_ml.is_zero()));
    }

    #[test]
    fn test_expand_beyond_bottle_volume() {
        // 取用量超過瓶容量：線性放大，不截斷
        let draws =
            PremixCalculator::expand_to_ingredients(&negroni_mix(), Decimal::from(2000)).unwrap();
        assert_eq!(draws[0].volume_ml, Decimal::from(1200));
        assert_eq!(draws[1].volume_ml, Decimal::from(800));
    }

    #[test]
    fn test_expand_rejects_non_premix() {
        let plain = ingredient_product("GIN-700", 700, 900);
        let err =
            PremixCalculator::expand_to_ingredients(&plain, Decimal::from(100)).unwrap_err();
        assert!(matches!(err, StockError::NotAPremix(id) if id == "GIN-700"));
    }

    #[test]
    fn test_expand_rejects_invalid_bottle_volume() {
        let mut premix = negroni_mix();
        premix.bottle_volume_ml = Decimal::ZERO;

        let err =
            PremixCalculator::expand_to_ingredients(&premix, Decimal::from(100)).unwrap_err();
        assert!(matches!(err, StockError::InvalidBottleVolume(_)));
    }

    proptest! {
        /// 展開對取用量線性：每個成分輸出與未捨入值的誤差不超過 0.5ml
        #[test]
        fn prop_expand_linear_within_rounding(draw in 0u32..=5_000u32) {
            let premix = negroni_mix();
            let draw = Decimal::from(draw);
            let draws = PremixCalculator::expand_to_ingredients(&premix, draw).unwrap();

            let scale = draw / premix.bottle_volume_ml;
            let half: Decimal = "0.5".parse().unwrap();
            for (entry, out) in premix.ingredients.as_ref().unwrap().iter().zip(&draws) {
                let exact = entry.volume_ml * scale;
                prop_assert!((out.volume_ml - exact).abs() <= half);
            }
        }
    }
}
