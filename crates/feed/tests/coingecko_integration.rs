use kanshi_core::price::error::FeedError;
use kanshi_core::price::port::PriceFeed;
use kanshi_feed::coingecko::CoinGeckoProvider;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// reqwest 以 rustls-no-provider 编译，构建客户端前进程必须装好
/// CryptoProvider。幂等：重复安装被忽略。
fn install_tls_provider() {
    rustls::crypto::ring::default_provider().install_default().ok();
}

/// 在随机端口起一个一次性 HTTP 桩服务，返回固定的响应体
async fn spawn_stub(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{addr}")
}

/// # Summary
/// 桩服务集成测试：验证嵌套 JSON 的解析与 USD 价格提取。
#[tokio::test]
async fn parses_current_price_from_stub() {
    install_tls_provider();
    let base = spawn_stub(
        "200 OK",
        r#"{"id":"bitcoin","market_data":{"current_price":{"usd":64250.37,"eur":59100.02}}}"#,
    )
    .await;

    let provider = CoinGeckoProvider::with_base_url(base).unwrap();
    let price = provider.current_price("BTC").await.unwrap();
    assert_eq!(price, dec!(64250.37));
}

/// # Summary
/// 桩服务集成测试：404 映射为 `FeedError::NotFound`。
#[tokio::test]
async fn maps_404_to_not_found() {
    install_tls_provider();
    let base = spawn_stub("404 Not Found", r#"{"error":"coin not found"}"#).await;

    let provider = CoinGeckoProvider::with_base_url(base).unwrap();
    let err = provider.current_price("NOPE").await.unwrap_err();
    assert!(matches!(err, FeedError::NotFound(_)));
}

/// # Summary
/// 桩服务集成测试：结构不符的响应映射为 `FeedError::Parse`。
#[tokio::test]
async fn maps_malformed_body_to_parse_error() {
    install_tls_provider();
    let base = spawn_stub("200 OK", r#"{"unexpected":true}"#).await;

    let provider = CoinGeckoProvider::with_base_url(base).unwrap();
    let err = provider.current_price("BTC").await.unwrap_err();
    assert!(matches!(err, FeedError::Parse(_)));
}

/// # Summary
/// 真实网络集成测试：从 CoinGecko 官方 API 抓取 BTC 当前价格。
///
/// # Logic
/// 默认忽略，仅在手动联网测试时开启。
#[tokio::test]
#[ignore]
async fn test_coingecko_real_fetch() {
    install_tls_provider();
    let provider = CoinGeckoProvider::new().unwrap();
    let result = provider.current_price("BTC").await;

    assert!(
        result.is_ok(),
        "Failed to fetch real data from CoinGecko: {:?}",
        result.err()
    );
    let price = result.unwrap();
    assert!(price > rust_decimal::Decimal::ZERO);
    println!("BTC current price: {price} USD");
}
