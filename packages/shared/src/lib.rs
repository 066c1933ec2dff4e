//! # CabriThon 共有ユーティリティ
//!
//! API サーバーとインフラ層の双方から使われる、ビジネスロジックを含まない型を置く。
//!
//! - [`health`] - ヘルスチェックエンドポイントのレスポンス型
//! - [`observability`] - トレーシング初期化とリクエストスパン（`observability` feature）

pub mod health;
pub mod observability;

pub use health::{
    DatabaseInfoDetail,
    DatabaseInfoResponse,
    DatabaseState,
    HealthResponse,
    HealthStatus,
    TableCountsResponse,
};
