//! # CabriThon API サーバー
//!
//! ヘルスチェック API を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! 設定項目は [`cabrithon_api::config`] を参照。ログ関連は以下:
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,cabrithon=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p cabrithon-api
//!
//! # 本番環境
//! API_PORT=8080 DATABASE_URL=postgres://... LOG_FORMAT=json cargo run -p cabrithon-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use cabrithon_api::{app_builder::build_app, config::AppConfig, handler::HealthState};
use cabrithon_domain::clock::SystemClock;
use cabrithon_infra::{PostgresDatabaseAccessor, db};
use cabrithon_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 接続プール（遅延接続）と State の構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("cabrithon-api");
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.server.host,
        config.server.port
    );

    // 起動時には接続しない。DB 停止中でもヘルスチェックは応答できる
    let pool = db::create_pool(&config.database.url, &config.database.pool_settings())
        .context("DATABASE_URL が不正です")?;

    let health_state = Arc::new(HealthState {
        accessor:       Arc::new(PostgresDatabaseAccessor::new(pool)),
        clock:          Arc::new(SystemClock),
        database_label: config.database.label.clone(),
    });

    let app = build_app(health_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API サーバーを停止しました");
    Ok(())
}

/// SIGINT / SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラを登録できません");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラを登録できません");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT を受信しました。シャットダウンします"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
