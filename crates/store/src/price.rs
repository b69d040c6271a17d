use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanshi_core::common::DateWindow;
use kanshi_core::price::entity::{NewPriceSample, PricePage, PriceSample};
use kanshi_core::price::port::PriceStore;
use kanshi_core::store::error::StoreError;
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::path::Path;
use std::str::FromStr;

/// 价格样本数据库文件名
const PRICES_DB: &str = "prices.db";

/// PriceStore 的 SQLite 实现。
///
/// # Summary
/// 在数据目录下的 `prices.db` 中维护追加型的 `prices` 表。
/// 价格以 TEXT 形式存储十进制字符串，避免浮点精度损失。
///
/// # Invariants
/// - `id` 为 AUTOINCREMENT 主键，与插入顺序一致。
/// - 表为追加型：本实现不提供任何更新或删除操作。
/// - SQLite 自身串行化写入，读方看到调用时刻的一致快照。
pub struct SqlitePriceStore {
    pool: SqlitePool,
}

impl SqlitePriceStore {
    /// # Summary
    /// 打开（必要时创建）价格样本数据库并初始化表结构。
    ///
    /// # Logic
    /// 1. 确保数据目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 执行 DDL 创建 `prices` 表与时间窗口查询所需的索引。
    ///
    /// # Arguments
    /// * `data_dir` - 数据根目录。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或错误。
    pub async fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::InitError(e.to_string()))?;

        let options = SqliteConnectOptions::new()
            .filename(data_dir.join(PRICES_DB))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp DATETIME NOT NULL,
                coin TEXT NOT NULL DEFAULT 'BTC',
                price TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_prices_coin_ts ON prices (coin, timestamp);
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// 将 TEXT 形式的十进制价格解析回 Decimal
    fn parse_price(raw: &str) -> Result<Decimal, StoreError> {
        Decimal::from_str(raw).map_err(|e| StoreError::Database(format!("bad price '{raw}': {e}")))
    }
}

#[async_trait]
impl PriceStore for SqlitePriceStore {
    /// # Summary
    /// 追加一条价格样本。
    ///
    /// # Logic
    /// 1. 缺省时间戳以当前 UTC 时刻补齐。
    /// 2. 插入 `prices` 表并取回 `last_insert_rowid` 作为样本 id。
    ///
    /// # Arguments
    /// * `sample` - 待插入的样本。
    ///
    /// # Returns
    /// * `Result<PriceSample, StoreError>` - 落库后的完整样本。
    async fn append(&self, sample: &NewPriceSample) -> Result<PriceSample, StoreError> {
        let timestamp = sample.timestamp.unwrap_or_else(Utc::now);

        let result = sqlx::query("INSERT INTO prices (timestamp, coin, price) VALUES (?, ?, ?)")
            .bind(timestamp)
            .bind(&sample.coin)
            .bind(sample.price.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(PriceSample {
            id: result.last_insert_rowid(),
            timestamp,
            coin: sample.coin.clone(),
            price: sample.price,
        })
    }

    /// # Summary
    /// 按币种与单日窗口分页读取样本。
    ///
    /// # Logic
    /// 1. `COUNT(*)` 统计窗口内匹配总数（与分页无关的真实总数）。
    /// 2. 按 `id` 升序执行 `LIMIT ? OFFSET ?` 取出当前页。
    ///
    /// # Arguments
    /// * `coin` - 精确匹配的币种代码。
    /// * `window` - 单日半开窗口 `[start, end)`。
    /// * `offset` - 跳过的行数。
    /// * `limit` - 页大小。
    ///
    /// # Returns
    /// * `Result<PricePage, StoreError>`
    async fn query_window(
        &self,
        coin: &str,
        window: &DateWindow,
        offset: i64,
        limit: i64,
    ) -> Result<PricePage, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM prices WHERE coin = ? AND timestamp >= ? AND timestamp < ?",
        )
        .bind(coin)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = sqlx::query_as::<_, (i64, DateTime<Utc>, String, String)>(
            r#"
            SELECT id, timestamp, coin, price
            FROM prices
            WHERE coin = ? AND timestamp >= ? AND timestamp < ?
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(coin)
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let samples = rows
            .into_iter()
            .map(|r| {
                Ok(PriceSample {
                    id: r.0,
                    timestamp: r.1,
                    coin: r.2,
                    price: Self::parse_price(&r.3)?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(PricePage { count, samples })
    }
}
