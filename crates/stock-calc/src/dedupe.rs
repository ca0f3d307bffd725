//! 重複品項合併

use rust_decimal::Decimal;
use std::collections::HashMap;

use stock_core::Product;

/// 名稱正規化：去除前後空白、壓縮連續空白、轉小寫
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// 判斷候選者是否應取代現任代表
///
/// 優先序：啟用 > 停用；再比最後更新時間（沒有時間戳視為較舊）；
/// 仍同分則保留先遇到的那筆。
fn supersedes(candidate: &Product, incumbent: &Product) -> bool {
    if candidate.is_active != incumbent.is_active {
        return candidate.is_active;
    }

    match (candidate.updated_at, incumbent.updated_at) {
        (Some(c), Some(i)) => c > i,
        (Some(_), None) => true,
        _ => false,
    }
}

/// 合併近似重複的產品
///
/// 分組鍵為（正規化名稱、瓶容量）：同名不同瓶容量不算重複。
/// 每組只留一筆代表，輸出順序依各組第一次出現的位置。
/// 此操作具冪等性，且不改動輸入。
pub fn dedupe_products_by_name(products: &[Product]) -> Vec<Product> {
    let mut index_by_key: HashMap<(String, Decimal), usize> = HashMap::new();
    let mut kept: Vec<Product> = Vec::new();

    for product in products {
        let key = (normalize_name(&product.name), product.bottle_volume_ml);

        match index_by_key.get(&key) {
            Some(&slot) => {
                if supersedes(product, &kept[slot]) {
                    kept[slot] = product.clone();
                }
            }
            None => {
                index_by_key.insert(key, kept.len());
                kept.push(product.clone());
            }
        }
    }

    if kept.len() < products.len() {
        tracing::debug!("重複品項合併：{} 筆 → {} 筆", products.len(), kept.len());
    }

    kept
}
