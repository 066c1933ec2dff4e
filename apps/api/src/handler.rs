//! # HTTP リクエストハンドラ
//!
//! - `health`: ヘルスチェック（稼働状態・DB 準備状況）

pub mod health;

pub use health::{HealthState, database_info, health_check};
