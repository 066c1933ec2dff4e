//! # CabriThon ドメイン層
//!
//! ヘルスチェックが扱うドメイン概念を定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘     ↓
//!     shared
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`collection`] - 件数を数える対象のコレクション（テーブル）
//! - [`table_counts`] - コレクションごとの件数と初期データ有無の判定
//! - [`clock`] - 現在時刻プロバイダ

pub mod clock;
pub mod collection;
pub mod table_counts;

pub use collection::Collection;
pub use table_counts::TableCounts;
