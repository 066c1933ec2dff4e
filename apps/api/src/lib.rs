//! # CabriThon API サーバー
//!
//! サービスの稼働状態とデータベースの準備状況を報告する HTTP API。
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`app_builder`] - ルーターとミドルウェアの構築
//!
//! ## エンドポイント
//!
//! | Method | Path | 説明 |
//! |--------|------|------|
//! | GET | `/api/v1/health` | 稼働状態と DB 接続状態 |
//! | GET | `/api/v1/health/database` | DB 接続状態と各テーブルの件数 |
//!
//! どちらも認証不要で、失敗時も 200 OK を返す。

pub mod app_builder;
pub mod config;
pub mod handler;
