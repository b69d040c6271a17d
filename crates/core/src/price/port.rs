use super::entity::{NewPriceSample, PricePage, PriceSample};
use super::error::FeedError;
use crate::common::DateWindow;
use crate::store::error::StoreError;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// # Summary
/// 价格样本存储接口，追加型写入与窗口化分页读取。
///
/// # Invariants
/// - 实现必须支持并发读与单写并存，读方看到调用时刻的一致快照即可。
/// - `append` 分配的 `id` 单调递增。
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// # Summary
    /// 追加一条价格样本。
    ///
    /// # Logic
    /// 1. `timestamp` 缺省时以插入时刻补齐。
    /// 2. 插入 `prices` 表并取回分配的主键。
    ///
    /// # Arguments
    /// * `sample`: 待插入的样本。
    ///
    /// # Returns
    /// 落库后的完整样本（含 `id` 与补齐的时间戳）或 `StoreError`。
    async fn append(&self, sample: &NewPriceSample) -> Result<PriceSample, StoreError>;

    /// # Summary
    /// 按币种与单日窗口分页读取样本。
    ///
    /// # Logic
    /// 1. 过滤 `coin == ?` 且 `timestamp` 落于 `[window.start, window.end)`。
    /// 2. `count` 统计过滤后的总行数，与分页无关。
    /// 3. 按 `id` 升序跳过 `offset` 行后取 `limit` 行。
    ///
    /// # Arguments
    /// * `coin`: 精确匹配的币种代码。
    /// * `window`: 单日半开窗口。
    /// * `offset`: 跳过的行数。
    /// * `limit`: 页大小（不设上限）。
    ///
    /// # Returns
    /// `PricePage` 或 `StoreError`。从未采样过的币种返回空页，不视为错误。
    async fn query_window(
        &self,
        coin: &str,
        window: &DateWindow,
        offset: i64,
        limit: i64,
    ) -> Result<PricePage, StoreError>;
}

/// # Summary
/// 行情数据源接口，抓取某币种的当前市场价格。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 实现必须对外部调用施加有界超时，抓取失败以 `FeedError` 报告。
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// # Summary
    /// 抓取币种的当前价格 (USD)。
    ///
    /// # Arguments
    /// * `coin`: 币种代码 (例如: BTC)。
    ///
    /// # Returns
    /// 当前价格或 `FeedError`。
    async fn current_price(&self, coin: &str) -> Result<Decimal, FeedError>;
}
