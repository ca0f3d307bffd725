//! 產品模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::safe_div;

/// 酒水分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// 伏特加
    Vodka,
    /// 琴酒
    Gin,
    /// 蘭姆酒
    Rum,
    /// 龍舌蘭
    Tequila,
    /// 威士忌
    Whisky,
    /// 利口酒
    Liqueur,
    /// 葡萄酒
    Wine,
    /// 啤酒
    Beer,
    /// 調飲材料（果汁、糖漿等）
    Mixer,
    /// 預調酒
    Premix,
    /// 其他
    Other,
}

impl ProductCategory {
    /// 子分類對照表（依父分類各自獨立）
    ///
    /// 每個分類持有自己的子分類表，Rum 的 "White" 與 Wine 的 "White"
    /// 互不干擾。
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            ProductCategory::Vodka => &["Plain", "Flavored"],
            ProductCategory::Gin => &["London Dry", "Old Tom", "Sloe"],
            ProductCategory::Rum => &["White", "Gold", "Dark", "Spiced"],
            ProductCategory::Tequila => &["Blanco", "Reposado", "Añejo"],
            ProductCategory::Whisky => &["Scotch", "Bourbon", "Irish", "Rye"],
            ProductCategory::Wine => &["White", "Red", "Rosé", "Sparkling"],
            ProductCategory::Beer => &["Lager", "Ale", "Stout", "Wheat"],
            ProductCategory::Liqueur
            | ProductCategory::Mixer
            | ProductCategory::Premix
            | ProductCategory::Other => &[],
        }
    }
}

/// 成本計算模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostMode {
    /// 自動：由配方成分推算每瓶成本
    Auto,
    /// 手動：直接使用設定的每瓶成本
    Manual,
}

/// 預調酒配方成分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremixIngredient {
    /// 成分產品ID
    pub product_id: String,

    /// 成分用量（毫升）
    pub volume_ml: Decimal,

    /// 占瓶容量比例（volume_ml / bottle_volume_ml，於最近一次重算時記錄）
    pub ratio: Decimal,
}

impl PremixIngredient {
    /// 創建新的配方成分（比例由產品端重算）
    pub fn new(product_id: String, volume_ml: Decimal) -> Self {
        Self {
            product_id,
            volume_ml,
            ratio: Decimal::ZERO,
        }
    }
}

/// 產品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: String,

    /// 顯示名稱
    pub name: String,

    /// 酒水分類
    pub category: ProductCategory,

    /// 瓶容量（毫升）
    pub bottle_volume_ml: Decimal,

    /// 每瓶成本
    pub cost_per_bottle: Decimal,

    /// 每份售價
    pub price_per_portion: Decimal,

    /// 每份容量（毫升；0 表示無法以杯數推算差異）
    pub portion_volume_ml: Decimal,

    /// 是否啟用
    pub is_active: bool,

    /// 最後更新時間
    pub updated_at: Option<DateTime<Utc>>,

    /// 補貨門檻（毫升；低於此量觸發補貨建議）
    pub reorder_threshold_ml: Option<Decimal>,

    /// 預設補貨數量（瓶）
    pub reorder_quantity: Option<Decimal>,

    /// 是否為預調酒（複合產品）
    pub is_premix: bool,

    /// 成本計算模式
    pub cost_mode: CostMode,

    /// 配方成分列表（僅預調酒）
    pub ingredients: Option<Vec<PremixIngredient>>,
}

impl Product {
    /// 創建新的產品
    pub fn new(
        id: String,
        name: String,
        category: ProductCategory,
        bottle_volume_ml: Decimal,
    ) -> Self {
        Self {
            id,
            name,
            category,
            bottle_volume_ml,
            cost_per_bottle: Decimal::ZERO,
            price_per_portion: Decimal::ZERO,
            portion_volume_ml: Decimal::ZERO,
            is_active: true,
            updated_at: None,
            reorder_threshold_ml: None,
            reorder_quantity: None,
            is_premix: false,
            cost_mode: CostMode::Manual,
            ingredients: None,
        }
    }

    /// 建構器模式：設置每瓶成本
    pub fn with_cost_per_bottle(mut self, cost: Decimal) -> Self {
        self.cost_per_bottle = cost;
        self
    }

    /// 建構器模式：設置每份售價與容量
    pub fn with_portion(mut self, price: Decimal, volume_ml: Decimal) -> Self {
        self.price_per_portion = price;
        self.portion_volume_ml = volume_ml;
        self
    }

    /// 建構器模式：設置啟用狀態
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// 建構器模式：設置最後更新時間
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// 建構器模式：設置補貨門檻與數量
    pub fn with_reorder(mut self, threshold_ml: Decimal, quantity: Decimal) -> Self {
        self.reorder_threshold_ml = Some(threshold_ml);
        self.reorder_quantity = Some(quantity);
        self
    }

    /// 建構器模式：設置為預調酒並載入配方
    ///
    /// 載入時即重算各成分比例。
    pub fn with_ingredients(mut self, ingredients: Vec<PremixIngredient>) -> Self {
        self.is_premix = true;
        self.cost_mode = CostMode::Auto;
        self.ingredients = Some(ingredients);
        self.recompute_ingredient_ratios();
        self
    }

    /// 建構器模式：設置成本計算模式
    pub fn with_cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    /// 變更瓶容量並保持配方比例一致
    pub fn set_bottle_volume(&mut self, bottle_volume_ml: Decimal) {
        self.bottle_volume_ml = bottle_volume_ml;
        self.recompute_ingredient_ratios();
    }

    /// 重算配方成分比例（ratio = volume_ml / bottle_volume_ml）
    ///
    /// 成分用量總和超過瓶容量（比例 > 1）視為有效輸入，照實記錄；
    /// 攔截屬於表單層的責任。
    pub fn recompute_ingredient_ratios(&mut self) {
        let bottle_volume = self.bottle_volume_ml;
        if let Some(ingredients) = self.ingredients.as_mut() {
            for ingredient in ingredients.iter_mut() {
                ingredient.ratio = safe_div(ingredient.volume_ml, bottle_volume);
            }
        }
    }

    /// 每毫升成本（瓶容量為零時回傳零）
    pub fn cost_per_ml(&self) -> Decimal {
        safe_div(self.cost_per_bottle, self.bottle_volume_ml)
    }

    /// 檢查是否設定了補貨自動化（門檻或數量任一）
    pub fn has_reorder_automation(&self) -> bool {
        self.reorder_threshold_ml.is_some() || self.reorder_quantity.is_some()
    }
}
