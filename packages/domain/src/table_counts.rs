//! # コレクション件数
//!
//! 5 つのコレクションの件数と、初期データ投入済みかどうかの判定を提供する。

use crate::collection::Collection;

/// コレクションごとの件数
///
/// 件数は `COUNT(*)` の結果であり、常に 0 以上。
///
/// ```
/// use cabrithon_domain::{Collection, TableCounts};
///
/// let mut counts = TableCounts::default();
/// counts.set(Collection::Clients, 5);
/// counts.set(Collection::Products, 3);
/// assert!(counts.is_ready());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    clients:           u64,
    products:          u64,
    promotions:        u64,
    suggested_orders:  u64,
    inventory_records: u64,
}

impl TableCounts {
    /// 指定コレクションの件数を取得する
    pub fn get(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Clients => self.clients,
            Collection::Products => self.products,
            Collection::Promotions => self.promotions,
            Collection::SuggestedOrders => self.suggested_orders,
            Collection::InventoryRecords => self.inventory_records,
        }
    }

    /// 指定コレクションの件数を設定する
    pub fn set(&mut self, collection: Collection, count: u64) {
        let slot = match collection {
            Collection::Clients => &mut self.clients,
            Collection::Products => &mut self.products,
            Collection::Promotions => &mut self.promotions,
            Collection::SuggestedOrders => &mut self.suggested_orders,
            Collection::InventoryRecords => &mut self.inventory_records,
        };
        *slot = count;
    }

    /// 初期データが投入済みか
    ///
    /// 取引先と商品が 1 件以上あれば利用可能とみなす。
    /// プロモーション・推奨発注・在庫は空でもよい。
    pub fn is_ready(&self) -> bool {
        self.clients > 0 && self.products > 0
    }
}
