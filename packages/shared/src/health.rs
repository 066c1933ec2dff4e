//! # ヘルスチェックレスポンス型
//!
//! `/api/v1/health` と `/api/v1/health/database` が返す JSON の形を定義する。
//!
//! どちらのエンドポイントも失敗時を含めて常に 200 OK を返すため、
//! 成否はステータスコードではなくボディのフィールドで表現する。

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `/health` の接続成功メッセージ
pub const MESSAGE_CONNECTED: &str = "Database connection successful";
/// `/health` の接続不可メッセージ
pub const MESSAGE_UNABLE_TO_CONNECT: &str = "Unable to connect to database";
/// `/health/database` の接続不可メッセージ
pub const MESSAGE_CANNOT_CONNECT: &str = "Cannot connect to database";
/// `/health/database` のデータ投入済みメッセージ
pub const MESSAGE_READY: &str = "Database has data and is ready!";
/// `/health/database` の初期データ未投入メッセージ
pub const MESSAGE_NEEDS_INITIAL_DATA: &str = "Database is connected but may need initial data";

/// サービス全体の稼働状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// データベース接続状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatabaseState {
    /// 接続確認に成功した
    #[serde(rename = "connected")]
    Connected,
    /// 接続確認は完了したが、接続できなかった
    #[serde(rename = "cannot connect")]
    CannotConnect,
    /// 接続確認そのものがエラーになった
    #[serde(rename = "error")]
    Error,
}

/// `/health` のレスポンス
///
/// ```
/// use cabrithon_shared::{DatabaseState, HealthResponse, HealthStatus};
///
/// let response = HealthResponse::connected(chrono::Utc::now());
/// assert_eq!(response.status, HealthStatus::Healthy);
/// assert_eq!(response.database, DatabaseState::Connected);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status:    HealthStatus,
    /// レスポンス生成時刻（UTC, RFC 3339）
    pub timestamp: DateTime<Utc>,
    pub database:  DatabaseState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message:   Option<String>,
    /// 接続確認エラーのメッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:     Option<String>,
}

impl HealthResponse {
    /// データベースに接続できた
    pub fn connected(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp,
            database: DatabaseState::Connected,
            message: Some(MESSAGE_CONNECTED.to_string()),
            error: None,
        }
    }

    /// データベースに接続できなかった
    pub fn cannot_connect(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            timestamp,
            database: DatabaseState::CannotConnect,
            message: Some(MESSAGE_UNABLE_TO_CONNECT.to_string()),
            error: None,
        }
    }

    /// 接続確認中にエラーが発生した
    pub fn error(timestamp: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            timestamp,
            database: DatabaseState::Error,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// `/health/database` の `tables` オブジェクト
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCountsResponse {
    pub clients:           u64,
    pub products:          u64,
    pub promotions:        u64,
    pub suggested_orders:  u64,
    pub inventory_records: u64,
}

/// `/health/database` のレスポンス
///
/// 共通フィールド（`connected`, `timestamp`）と、結果ごとに異なる
/// フィールド群（[`DatabaseInfoDetail`]）を平坦化して出力する。
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseInfoResponse {
    pub connected: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub detail:    DatabaseInfoDetail,
}

/// `/health/database` の結果別フィールド
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DatabaseInfoDetail {
    /// 接続して件数を取得できた
    Connected {
        /// データベースの表示名（例: `"Supabase PostgreSQL"`）
        database: String,
        tables:   TableCountsResponse,
        message:  String,
    },
    /// 接続できなかった
    Unreachable { message: String },
    /// 接続確認または件数取得でエラーになった
    Failed {
        error:       String,
        /// 原因エラーのメッセージ（存在しない場合は `null`）
        #[serde(rename = "innerError")]
        inner_error: Option<String>,
    },
}

impl DatabaseInfoResponse {
    /// 件数を取得できた
    ///
    /// `ready` が true なら投入済み、false なら初期データ未投入のメッセージを付ける。
    pub fn connected(
        timestamp: DateTime<Utc>,
        database: impl Into<String>,
        tables: TableCountsResponse,
        ready: bool,
    ) -> Self {
        let message = if ready {
            MESSAGE_READY
        } else {
            MESSAGE_NEEDS_INITIAL_DATA
        };
        Self {
            connected: true,
            timestamp,
            detail: DatabaseInfoDetail::Connected {
                database: database.into(),
                tables,
                message: message.to_string(),
            },
        }
    }

    /// 接続できなかった
    pub fn unreachable(timestamp: DateTime<Utc>) -> Self {
        Self {
            connected: false,
            timestamp,
            detail: DatabaseInfoDetail::Unreachable {
                message: MESSAGE_CANNOT_CONNECT.to_string(),
            },
        }
    }

    /// エラーになった
    pub fn failed(
        timestamp: DateTime<Utc>,
        error: impl Into<String>,
        inner_error: Option<String>,
    ) -> Self {
        Self {
            connected: false,
            timestamp,
            detail: DatabaseInfoDetail::Failed {
                error: error.into(),
                inner_error,
            },
        }
    }
}
