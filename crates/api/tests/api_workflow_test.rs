use chrono::{TimeZone, Utc};
use kanshi_api::server::{AppState, build_router};
use kanshi_api::types::PagedPricesResponse;
use kanshi_core::price::entity::NewPriceSample;
use kanshi_core::price::port::PriceStore;
use kanshi_store::price::SqlitePriceStore;
use kanshi_store::threshold::SqliteThresholdStore;
use reqwest::StatusCode;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::net::TcpListener;

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server() -> (String, Arc<SqlitePriceStore>, tempfile::TempDir) {
    // reqwest 以 rustls-no-provider 编译，构建测试客户端前装好 CryptoProvider
    rustls::crypto::ring::default_provider().install_default().ok();

    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let price_store = Arc::new(SqlitePriceStore::new(tmp_dir.path()).await.unwrap());
    let threshold_store = Arc::new(SqliteThresholdStore::new(tmp_dir.path()).await.unwrap());

    let state = AppState {
        price_store: price_store.clone(),
        threshold_store,
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let addr = format!("http://127.0.0.1:{}", port);

    let router = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // 稍微等待服务器启动
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    (addr, price_store, tmp_dir)
}

/// 向存储写入 2024-01-01 当天的 150 条 BTC 样本：
/// 前 149 条价格 100，最后一条 500000
async fn seed_scenario_samples(store: &SqlitePriceStore) {
    let day = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    for i in 0..150i64 {
        let price = if i == 149 { dec!(500000) } else { dec!(100) };
        store
            .append(&NewPriceSample {
                timestamp: Some(day + chrono::Duration::seconds(i * 30)),
                coin: "BTC".to_string(),
                price,
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn paged_query_returns_true_count_and_next_url() {
    let (addr, store, _tmp) = spawn_test_server().await;
    seed_scenario_samples(&store).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!(
            "{addr}/api/v1/prices/BTC?date=01-01-2024&offset=0&limit=100"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: PagedPricesResponse = resp.json().await.unwrap();
    assert_eq!(body.count, 150);
    assert_eq!(body.data.len(), 100);
    assert_eq!(body.url, "/api/v1/prices/BTC?date=01-01-2024&offset=0&limit=100");
    assert_eq!(
        body.next,
        "/api/v1/prices/BTC?date=01-01-2024&offset=100&limit=100"
    );
    assert_eq!(body.data[0].price, 100);
    assert_eq!(body.data[0].coin, "BTC");
    assert_eq!(body.data[0].timestamp, "01-01-2024 00:00:00");

    // 第二页：剩余 50 条，没有下一页
    let body: PagedPricesResponse = client
        .get(format!(
            "{addr}/api/v1/prices/BTC?date=01-01-2024&offset=100&limit=100"
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.count, 150);
    assert_eq!(body.data.len(), 50);
    assert_eq!(body.next, "N/A");
    // 整数截断后的展示价格
    assert_eq!(body.data.last().unwrap().price, 500000);
}

#[tokio::test]
async fn defaults_apply_when_pagination_params_omitted() {
    let (addr, store, _tmp) = spawn_test_server().await;
    seed_scenario_samples(&store).await;

    let body: PagedPricesResponse = reqwest::get(format!(
        "{addr}/api/v1/prices/BTC?date=01-01-2024"
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();

    // 默认 offset=0, limit=100，且在回显 URL 中显式出现
    assert_eq!(body.data.len(), 100);
    assert_eq!(body.url, "/api/v1/prices/BTC?date=01-01-2024&offset=0&limit=100");
}

#[tokio::test]
async fn huge_offset_reports_no_next_page() {
    let (addr, store, _tmp) = spawn_test_server().await;
    seed_scenario_samples(&store).await;

    // offset + limit 会溢出 i64 的极端分页请求仍是合法输入
    let resp = reqwest::get(format!(
        "{addr}/api/v1/prices/BTC?date=01-01-2024&offset={}&limit=1",
        i64::MAX
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: PagedPricesResponse = resp.json().await.unwrap();
    assert_eq!(body.count, 150);
    assert!(body.data.is_empty());
    assert_eq!(body.next, "N/A");
}

#[tokio::test]
async fn repeated_queries_are_deterministic() {
    let (addr, store, _tmp) = spawn_test_server().await;
    seed_scenario_samples(&store).await;

    let url = format!("{addr}/api/v1/prices/BTC?date=01-01-2024&offset=10&limit=5");
    let first: PagedPricesResponse =
        reqwest::get(&url).await.unwrap().json().await.unwrap();
    let second: PagedPricesResponse =
        reqwest::get(&url).await.unwrap().json().await.unwrap();

    assert_eq!(first.count, second.count);
    assert_eq!(first.url, second.url);
    assert_eq!(first.next, second.next);
    assert_eq!(
        first.data.iter().map(|r| r.price).collect::<Vec<_>>(),
        second.data.iter().map(|r| r.price).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn empty_store_returns_valid_empty_page() {
    let (addr, _store, _tmp) = spawn_test_server().await;

    let resp = reqwest::get(format!("{addr}/api/v1/prices/BTC?date=01-01-2024"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: PagedPricesResponse = resp.json().await.unwrap();
    assert_eq!(body.count, 0);
    assert!(body.data.is_empty());
    assert_eq!(body.next, "N/A");
}

#[tokio::test]
async fn invalid_or_missing_date_is_client_error() {
    let (addr, _store, _tmp) = spawn_test_server().await;
    let client = reqwest::Client::new();

    // 不存在的日历日
    let resp = client
        .get(format!("{addr}/api/v1/prices/BTC?date=31-02-2024"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // date 缺失
    let resp = client
        .get(format!("{addr}/api/v1/prices/BTC"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 格式错误
    let resp = client
        .get(format!("{addr}/api/v1/prices/BTC?date=2024-01-01"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn threshold_roundtrip_with_partial_update() {
    let (addr, _store, _tmp) = spawn_test_server().await;
    let client = reqwest::Client::new();

    // 1. 完整写入
    let resp = client
        .put(format!("{addr}/api/v1/thresholds"))
        .json(&serde_json::json!({
            "min": "20000",
            "max": "80000",
            "alert_destination": "ops@example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // 2. 部分更新：只改 max
    let resp = client
        .put(format!("{addr}/api/v1/thresholds"))
        .json(&serde_json::json!({ "max": "90000" }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["min"], "20000");
    assert_eq!(body["max"], "90000");
    assert_eq!(body["alert_destination"], "ops@example.com");

    // 3. 读取确认
    let body: serde_json::Value = client
        .get(format!("{addr}/api/v1/thresholds"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["min"], "20000");
    assert_eq!(body["max"], "90000");

    // 4. 不可解析的 min 是客户端错误
    let resp = client
        .put(format!("{addr}/api/v1/thresholds"))
        .json(&serde_json::json!({ "min": "not-a-number" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
