//! # Database Accessor
//!
//! ヘルスチェックが必要とするデータベース操作（接続確認・件数取得）を定義する。
//!
//! ハンドラは [`DatabaseAccessor`] trait にのみ依存し、テストでは
//! インメモリのモック（`mock` モジュール）に差し替える。

use async_trait::async_trait;
use cabrithon_domain::Collection;
use sqlx::{Connection, PgPool};

use crate::error::InfraError;

/// 接続確認とコレクション件数の取得を行う trait
#[async_trait]
pub trait DatabaseAccessor: Send + Sync {
    /// データベースに接続できるか確認する
    ///
    /// 接続できなかった場合は `Ok(false)` を返す。
    /// 接続可否の判定自体が失敗した場合のみ `Err` を返す。
    async fn can_connect(&self) -> Result<bool, InfraError>;

    /// コレクションの件数を数える
    async fn count(&self, collection: Collection) -> Result<u64, InfraError>;
}

/// PostgreSQL 実装の DatabaseAccessor
#[derive(Debug, Clone)]
pub struct PostgresDatabaseAccessor {
    pool: PgPool,
}

impl PostgresDatabaseAccessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseAccessor for PostgresDatabaseAccessor {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn can_connect(&self) -> Result<bool, InfraError> {
        let mut conn = match self.pool.acquire().await {
            Ok(conn) => conn,
            Err(e) if is_connection_failure(&e) => {
                tracing::warn!(error = %e, "データベースに接続できません");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        match conn.ping().await {
            Ok(()) => Ok(true),
            Err(e) if is_connection_failure(&e) => {
                tracing::warn!(error = %e, "データベースへの ping に失敗しました");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%collection))]
    async fn count(&self, collection: Collection) -> Result<u64, InfraError> {
        // テーブル名は Collection が持つ固定文字列のみ
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table_name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;

        u64::try_from(count).map_err(|_| {
            InfraError::unexpected(format!("{collection} の件数が負数です: {count}"))
        })
    }
}

/// 「接続できない」とみなすエラーかを判定する
///
/// ネットワーク・TLS・プールの失敗に加え、認証失敗（SQLSTATE クラス 28）と
/// データベース不存在（`3D000`）も接続不可として扱う。
/// それ以外（クエリエラーなど）は接続確認自体の失敗として呼び出し元に返す。
fn is_connection_failure(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_error) => db_error
            .code()
            .is_some_and(|code| code.starts_with("28") || code == "3D000"),
        _ => false,
    }
}
