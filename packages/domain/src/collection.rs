//! # コレクション
//!
//! `/health/database` が件数を報告する 5 つのコレクションを表す。
//!
//! テーブル名はこの enum が `&'static str` として保持する。
//! 呼び出し側の文字列が SQL に入り込む経路は存在しない。

use strum::{EnumIter, IntoStaticStr};

/// 件数報告の対象となるコレクション
///
/// `IntoStaticStr` は `tables` オブジェクトのキー（snake_case）を返す。
///
/// ```
/// use cabrithon_domain::Collection;
///
/// let key: &'static str = Collection::SuggestedOrders.into();
/// assert_eq!(key, "suggested_orders");
/// assert_eq!(Collection::InventoryRecords.table_name(), "inventory_clients");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    /// 取引先
    Clients,
    /// 商品
    Products,
    /// プロモーション
    Promotions,
    /// 推奨発注
    SuggestedOrders,
    /// 取引先ごとの在庫レコード
    InventoryRecords,
}

impl Collection {
    /// PostgreSQL 上のテーブル名
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Products => "products",
            Self::Promotions => "promotions",
            Self::SuggestedOrders => "suggested_orders",
            // 在庫は取引先×商品の中間テーブルに保存されている
            Self::InventoryRecords => "inventory_clients",
        }
    }

    /// レスポンスの `tables` オブジェクトで使うキー
    pub fn key(&self) -> &'static str {
        (*self).into()
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
