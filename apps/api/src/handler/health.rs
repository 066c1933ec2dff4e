//! # ヘルスチェックハンドラ
//!
//! サービスの稼働状態とデータベースの準備状況を報告する。
//!
//! - `GET /api/v1/health` — DB 接続確認の結果を返す
//! - `GET /api/v1/health/database` — DB 接続確認に加え、各コレクションの件数を返す
//!
//! ## 常に 200 OK
//!
//! 監視ツールはボディのみを解析する前提のため、DB 操作の失敗は
//! ハンドラ内で捕捉してログに出し、ボディの `status` / `connected` で表現する。
//! ステータスコードは常に 200 OK。
//!
//! レスポンス型は [`cabrithon_shared::health`] を参照。

use std::{error::Error as _, sync::Arc};

use axum::{Json, extract::State};
use cabrithon_domain::{Collection, TableCounts, clock::Clock};
use cabrithon_infra::{DatabaseAccessor, InfraError};
use cabrithon_shared::{DatabaseInfoResponse, HealthResponse, TableCountsResponse};
use strum::IntoEnumIterator;

/// ヘルスチェック用の State
pub struct HealthState {
    pub accessor:       Arc<dyn DatabaseAccessor>,
    pub clock:          Arc<dyn Clock>,
    /// `/health/database` の `database` フィールドに出す表示名
    pub database_label: String,
}

/// ヘルスチェックエンドポイント
///
/// | 接続確認の結果 | `status` | `database` |
/// |----------------|----------|------------|
/// | 接続できた | `healthy` | `connected` |
/// | 接続できなかった | `unhealthy` | `cannot connect` |
/// | エラー | `unhealthy` | `error`（`error` にメッセージ） |
#[tracing::instrument(skip_all)]
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    let response = match state.accessor.can_connect().await {
        Ok(true) => HealthResponse::connected(state.clock.now()),
        Ok(false) => HealthResponse::cannot_connect(state.clock.now()),
        Err(e) => {
            tracing::error!(error = ?e, "ヘルスチェックに失敗しました");
            HealthResponse::error(state.clock.now(), e.to_string())
        }
    };

    Json(response)
}

/// データベース準備状況エンドポイント
///
/// 接続できた場合のみ 5 つのコレクションの件数を順に取得する。
/// 取引先と商品が 1 件以上あれば「利用可能」のメッセージを返す。
#[tracing::instrument(skip_all)]
pub async fn database_info(State(state): State<Arc<HealthState>>) -> Json<DatabaseInfoResponse> {
    let response = match collect_table_counts(state.accessor.as_ref()).await {
        Ok(Some(counts)) => DatabaseInfoResponse::connected(
            state.clock.now(),
            state.database_label.as_str(),
            to_response(&counts),
            counts.is_ready(),
        ),
        Ok(None) => DatabaseInfoResponse::unreachable(state.clock.now()),
        Err(e) => {
            tracing::error!(error = ?e, "データベース情報の取得に失敗しました");
            let inner_error = e.source().map(ToString::to_string);
            DatabaseInfoResponse::failed(state.clock.now(), e.to_string(), inner_error)
        }
    };

    Json(response)
}

/// 接続確認後、全コレクションの件数を取得する
///
/// 接続できなかった場合は `Ok(None)`。
async fn collect_table_counts(
    accessor: &dyn DatabaseAccessor,
) -> Result<Option<TableCounts>, InfraError> {
    if !accessor.can_connect().await? {
        return Ok(None);
    }

    let mut counts = TableCounts::default();
    for collection in Collection::iter() {
        counts.set(collection, accessor.count(collection).await?);
    }

    tracing::debug!(?counts, "件数を取得しました");
    Ok(Some(counts))
}

fn to_response(counts: &TableCounts) -> TableCountsResponse {
    TableCountsResponse {
        clients:           counts.get(Collection::Clients),
        products:          counts.get(Collection::Products),
        promotions:        counts.get(Collection::Promotions),
        suggested_orders:  counts.get(Collection::SuggestedOrders),
        inventory_records: counts.get(Collection::InventoryRecords),
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::get,
    };
    use cabrithon_domain::clock::FixedClock;
    use cabrithon_infra::mock::MockDatabaseAccessor;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;

    fn counts(clients: u64, products: u64) -> TableCounts {
        let mut counts = TableCounts::default();
        counts.set(Collection::Clients, clients);
        counts.set(Collection::Products, products);
        counts
    }

    fn create_test_app(accessor: MockDatabaseAccessor) -> Router {
        let state = Arc::new(HealthState {
            accessor:       Arc::new(accessor),
            clock:          Arc::new(FixedClock::new(
                Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
            )),
            database_label: "Supabase PostgreSQL".to_string(),
        });

        Router::new()
            .route("/health", get(health_check))
            .route("/health/database", get(database_info))
            .with_state(state)
    }

    async fn get_json(sut: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = sut.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    // ===== health_check =====

    #[tokio::test]
    async fn test_health_check_接続できる場合healthyを返す() {
        // Given
        let sut = create_test_app(MockDatabaseAccessor::connected(TableCounts::default()));

        // When
        let (status, json) = get_json(sut, "/health").await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "timestamp": "2025-03-01T09:30:00Z",
                "database": "connected",
                "message": "Database connection successful"
            })
        );
    }

    #[tokio::test]
    async fn test_health_check_接続できない場合unhealthyを返す() {
        let sut = create_test_app(MockDatabaseAccessor::unreachable());

        let (status, json) = get_json(sut, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["database"], "cannot connect");
        assert_eq!(json["message"], "Unable to connect to database");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_health_check_エラーでも200でエラーメッセージを返す() {
        let accessor = MockDatabaseAccessor::probe_fails("server closed the connection");
        let expected_error = accessor.can_connect().await.unwrap_err().to_string();
        let sut = create_test_app(accessor);

        let (status, json) = get_json(sut, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["database"], "error");
        assert_eq!(json["error"], expected_error);
        assert!(json.get("message").is_none());
    }

    // ===== database_info =====

    #[rstest]
    #[case(0, 0, "Database is connected but may need initial data")]
    #[case(5, 0, "Database is connected but may need initial data")]
    #[case(0, 3, "Database is connected but may need initial data")]
    #[case(5, 3, "Database has data and is ready!")]
    #[tokio::test]
    async fn test_database_info_件数に応じたメッセージを返す(
        #[case] clients: u64,
        #[case] products: u64,
        #[case] expected_message: &str,
    ) {
        let sut = create_test_app(MockDatabaseAccessor::connected(counts(clients, products)));

        let (status, json) = get_json(sut, "/health/database").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["connected"], true);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn test_database_info_全コレクションの件数を返す() {
        let mut table_counts = counts(5, 3);
        table_counts.set(Collection::Promotions, 2);
        table_counts.set(Collection::SuggestedOrders, 8);
        table_counts.set(Collection::InventoryRecords, 15);
        let sut = create_test_app(MockDatabaseAccessor::connected(table_counts));

        let (_, json) = get_json(sut, "/health/database").await;

        assert_eq!(
            json,
            serde_json::json!({
                "connected": true,
                "timestamp": "2025-03-01T09:30:00Z",
                "database": "Supabase PostgreSQL",
                "tables": {
                    "clients": 5,
                    "products": 3,
                    "promotions": 2,
                    "suggested_orders": 8,
                    "inventory_records": 15
                },
                "message": "Database has data and is ready!"
            })
        );
    }

    #[tokio::test]
    async fn test_database_info_件数は順番に1回ずつ取得する() {
        let accessor = MockDatabaseAccessor::connected(counts(1, 1));
        let sut = create_test_app(accessor.clone());

        get_json(sut, "/health/database").await;

        assert_eq!(
            accessor.counted(),
            vec![
                Collection::Clients,
                Collection::Products,
                Collection::Promotions,
                Collection::SuggestedOrders,
                Collection::InventoryRecords,
            ]
        );
    }

    #[tokio::test]
    async fn test_database_info_接続できない場合tablesを返さず件数も取得しない() {
        let accessor = MockDatabaseAccessor::unreachable();
        let sut = create_test_app(accessor.clone());

        let (status, json) = get_json(sut, "/health/database").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "connected": false,
                "timestamp": "2025-03-01T09:30:00Z",
                "message": "Cannot connect to database"
            })
        );
        assert!(accessor.counted().is_empty());
    }

    #[tokio::test]
    async fn test_database_info_件数取得エラーでerrorとinner_errorを返す() {
        let message = "relation \"promotions\" does not exist";
        let expected = MockDatabaseAccessor::count_fails(
            TableCounts::default(),
            Collection::Promotions,
            message,
        )
        .count(Collection::Promotions)
        .await
        .unwrap_err();
        let accessor = MockDatabaseAccessor::count_fails(counts(5, 3), Collection::Promotions, message);
        let sut = create_test_app(accessor.clone());

        let (status, json) = get_json(sut, "/health/database").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["connected"], false);
        assert_eq!(json["error"], expected.to_string());
        assert_eq!(json["innerError"], expected.source().unwrap().to_string());
        assert!(json["innerError"].as_str().unwrap().contains(message));
        assert!(json.get("tables").is_none());
        // 失敗したコレクション以降は取得しない
        assert_eq!(
            accessor.counted(),
            vec![
                Collection::Clients,
                Collection::Products,
                Collection::Promotions,
            ]
        );
    }

    #[tokio::test]
    async fn test_database_info_接続確認エラーでもconnected_falseを返す() {
        let sut = create_test_app(MockDatabaseAccessor::probe_fails("boom"));

        let (status, json) = get_json(sut, "/health/database").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["connected"], false);
        assert!(json["error"].as_str().unwrap().contains("boom"));
        assert!(json["innerError"].as_str().unwrap().contains("boom"));
    }
}
