//! # Clock（時刻プロバイダ）
//!
//! ヘルスチェックレスポンスの `timestamp` を生成する時刻源。
//! ハンドラは `Utc::now()` を直接呼ばず、この trait 経由で時刻を得る。

use chrono::{DateTime, Utc};

/// 現在時刻（UTC）を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻を返す本番用実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ時刻を返すテスト用実装
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
