use async_trait::async_trait;
use kanshi_core::price::error::FeedError;
use kanshi_core::price::port::PriceFeed;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// CoinGecko 官方 API 基地址
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// # Summary
/// CoinGecko 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，携带 10 秒有界超时。
/// - `base_url` 可替换，便于测试指向本地桩服务。
#[derive(Clone)]
pub struct CoinGeckoProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// API 基地址（不含路径）
    base_url: String,
}

impl CoinGeckoProvider {
    /// # Summary
    /// 创建一个指向官方 API 的 CoinGeckoProvider 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒超时，保证采样周期不会被挂起的请求拖死。
    /// 2. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * None
    ///
    /// # Returns
    /// 初始化后的 CoinGeckoProvider，客户端构建失败时返回 FeedError。
    pub fn new() -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// # Summary
    /// 创建指向指定基地址的实例（测试用本地桩服务）。
    ///
    /// # Arguments
    /// * `base_url`: API 基地址，例如 `http://127.0.0.1:9000`。
    ///
    /// # Returns
    /// 初始化后的 CoinGeckoProvider，客户端构建失败时返回 FeedError。
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FeedError::Unknown(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// # Summary
    /// 将币种代码映射为 CoinGecko 的 coin id。
    ///
    /// # Logic
    /// 常见币种走内置映射表，其余按小写代码直接透传。
    ///
    /// # Arguments
    /// * `coin`: 币种代码 (例如: BTC)。
    ///
    /// # Returns
    /// CoinGecko coin id (例如: bitcoin)。
    fn coin_id(coin: &str) -> String {
        match coin.to_ascii_uppercase().as_str() {
            "BTC" => "bitcoin".to_string(),
            "ETH" => "ethereum".to_string(),
            "SOL" => "solana".to_string(),
            "DOGE" => "dogecoin".to_string(),
            other => other.to_ascii_lowercase(),
        }
    }
}

/// # Summary
/// CoinGecko `/coins/{id}` 响应顶层结构。
///
/// # Invariants
/// - 仅反序列化 market_data 分支，其余字段忽略。
#[derive(Deserialize, Debug)]
struct CoinResponse {
    market_data: MarketData,
}

/// # Summary
/// CoinGecko 行情数据部分。
#[derive(Deserialize, Debug)]
struct MarketData {
    current_price: CurrentPrice,
}

/// # Summary
/// 各法币计价的当前价格，仅取 USD。
#[derive(Deserialize, Debug)]
struct CurrentPrice {
    usd: Decimal,
}

#[async_trait]
impl PriceFeed for CoinGeckoProvider {
    /// # Summary
    /// 从 CoinGecko 抓取币种当前美元价格。
    ///
    /// # Logic
    /// 1. 将币种代码映射为 coin id 并构建 `/api/v3/coins/{id}` URL。
    /// 2. 关闭 localization/tickers/community/developer/sparkline 分支减小响应体。
    /// 3. 发起异步请求并解析嵌套 JSON，提取 `market_data.current_price.usd`。
    ///
    /// # Arguments
    /// * `coin`: 币种代码 (例如: BTC)。
    ///
    /// # Returns
    /// 成功返回当前价格，失败返回 FeedError。
    async fn current_price(&self, coin: &str) -> Result<Decimal, FeedError> {
        let url = format!("{}/api/v3/coins/{}", self.base_url, Self::coin_id(coin));

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("localization", "false"),
                ("tickers", "false"),
                ("market_data", "true"),
                ("community_data", "false"),
                ("developer_data", "false"),
                ("sparkline", "false"),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FeedError::NotFound(coin.to_string()));
        }
        if !resp.status().is_success() {
            return Err(FeedError::Network(format!("HTTP {}", resp.status())));
        }

        let json: CoinResponse = resp
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        Ok(json.market_data.current_price.usd)
    }
}
