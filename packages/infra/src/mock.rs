//! # テスト用モック Database Accessor
//!
//! ハンドラテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! cabrithon-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cabrithon_domain::{Collection, TableCounts};

use crate::{database_accessor::DatabaseAccessor, error::InfraError};

/// モックが返す結果の設定
#[derive(Debug, Clone)]
enum Behavior {
    /// 接続でき、設定した件数を返す
    Connected(TableCounts),
    /// 接続できない
    Unreachable,
    /// 接続確認でエラーになる
    ProbeFails(String),
    /// 接続できるが、指定コレクションの件数取得でエラーになる
    CountFails {
        counts:     TableCounts,
        collection: Collection,
        message:    String,
    },
}

/// インメモリの DatabaseAccessor
///
/// 呼び出された件数取得の対象を記録し、テストから検証できる。
#[derive(Debug, Clone)]
pub struct MockDatabaseAccessor {
    behavior: Behavior,
    counted:  Arc<Mutex<Vec<Collection>>>,
}

impl MockDatabaseAccessor {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            counted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn connected(counts: TableCounts) -> Self {
        Self::with_behavior(Behavior::Connected(counts))
    }

    pub fn unreachable() -> Self {
        Self::with_behavior(Behavior::Unreachable)
    }

    /// `can_connect` が `sqlx::Error::Protocol(message)` 由来のエラーを返す
    pub fn probe_fails(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::ProbeFails(message.into()))
    }

    /// `collection` の件数取得だけが `sqlx::Error::Protocol(message)` 由来のエラーを返す
    pub fn count_fails(
        counts: TableCounts,
        collection: Collection,
        message: impl Into<String>,
    ) -> Self {
        Self::with_behavior(Behavior::CountFails {
            counts,
            collection,
            message: message.into(),
        })
    }

    /// これまでに件数取得された順にコレクションを返す
    pub fn counted(&self) -> Vec<Collection> {
        self.counted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatabaseAccessor for MockDatabaseAccessor {
    async fn can_connect(&self) -> Result<bool, InfraError> {
        match &self.behavior {
            Behavior::Connected(_) | Behavior::CountFails { .. } => Ok(true),
            Behavior::Unreachable => Ok(false),
            Behavior::ProbeFails(message) => Err(sqlx::Error::Protocol(message.clone()).into()),
        }
    }

    async fn count(&self, collection: Collection) -> Result<u64, InfraError> {
        self.counted.lock().unwrap().push(collection);
        match &self.behavior {
            Behavior::Connected(counts) => Ok(counts.get(collection)),
            Behavior::CountFails {
                counts,
                collection: failing,
                message,
            } => {
                if *failing == collection {
                    Err(sqlx::Error::Protocol(message.clone()).into())
                } else {
                    Ok(counts.get(collection))
                }
            }
            Behavior::Unreachable | Behavior::ProbeFails(_) => {
                Err(sqlx::Error::PoolTimedOut.into())
            }
        }
    }
}
