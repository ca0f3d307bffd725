//! 產品快取

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use stock_core::Product;

/// 快取條目
#[derive(Debug, Clone)]
struct CacheEntry {
    product: Product,
    cached_at: DateTime<Utc>,
}

/// 產品快取（直寫式，附存活時間）
///
/// 由持久層協作端持有，計算引擎不經手。時鐘一律由呼叫端傳入，
/// 測試下行為可重現。過期條目讀取時視為未命中，由
/// [`ProductCache::purge_expired`] 實際清出。
#[derive(Debug)]
pub struct ProductCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl ProductCache {
    /// 創建新的快取
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// 讀取產品；不存在或已過期回傳 None
    pub fn get(&self, product_id: &str, now: DateTime<Utc>) -> Option<&Product> {
        self.entries
            .get(product_id)
            .filter(|entry| now - entry.cached_at <= self.ttl)
            .map(|entry| &entry.product)
    }

    /// 寫入產品（寫入同時更新時間戳）
    pub fn set(&mut self, product: Product, now: DateTime<Utc>) {
        self.entries.insert(
            product.id.clone(),
            CacheEntry {
                product,
                cached_at: now,
            },
        );
    }

    /// 使單一產品失效
    pub fn invalidate(&mut self, product_id: &str) {
        self.entries.remove(product_id);
    }

    /// 清空快取
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 清出所有過期條目，回傳清出數量
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now - entry.cached_at <= self.ttl);
        before - self.entries.len()
    }

    /// 快取條目數（含尚未清出的過期條目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 檢查快取是否為空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
