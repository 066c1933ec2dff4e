//! # CabriThon インフラ層
//!
//! PostgreSQL への接続とクエリ実行を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL 接続プールの作成
//! - **Database Accessor**: 接続確認とコレクション件数の取得
//! - **エラー変換**: `sqlx::Error` を [`InfraError`] にラップ
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール管理
//! - [`database_accessor`] - 接続確認・件数取得 trait と PostgreSQL 実装
//! - [`error`] - インフラ層エラー定義
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod database_accessor;
pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use database_accessor::{DatabaseAccessor, PostgresDatabaseAccessor};
pub use error::{InfraError, InfraErrorKind};
