use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 价格样本实体，对应 `prices` 表中的一条已落库记录。
///
/// # Invariants
/// - `id` 由存储层单调分配，全局唯一且与插入顺序一致。
/// - `coin` 非空，`price` 非负。
/// - 样本只插入、不更新、不删除（追加型存储）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    // 存储层分配的主键
    pub id: i64,
    // 采样时刻
    pub timestamp: DateTime<Utc>,
    // 币种代码 (例如: BTC)
    pub coin: String,
    // 采样到的市场价格 (USD)
    pub price: Decimal,
}

/// # Summary
/// 待插入的价格样本，`id` 由存储层分配。
///
/// # Invariants
/// - `timestamp` 为 None 时由存储层以插入时刻补齐。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPriceSample {
    // 采样时刻，缺省为插入时刻
    pub timestamp: Option<DateTime<Utc>>,
    // 币种代码
    pub coin: String,
    // 市场价格
    pub price: Decimal,
}

impl NewPriceSample {
    /// 以当前隐式时间戳构造一条新样本
    pub fn now(coin: impl Into<String>, price: Decimal) -> Self {
        Self {
            timestamp: None,
            coin: coin.into(),
            price,
        }
    }
}

/// # Summary
/// 价格越界方向。价格高于 `max` 为 `Upper`，低于 `min` 为 `Lower`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreachDirection {
    Upper,
    Lower,
}

impl std::fmt::Display for BreachDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreachDirection::Upper => write!(f, "upper"),
            BreachDirection::Lower => write!(f, "lower"),
        }
    }
}

/// # Summary
/// 分页查询结果：窗口内匹配总数与当前页样本。
///
/// # Invariants
/// - `count` 是过滤后的真实总行数，与 offset/limit 无关。
#[derive(Debug, Clone)]
pub struct PricePage {
    // 窗口内匹配的总行数
    pub count: i64,
    // 当前页样本，按 id 升序
    pub samples: Vec<PriceSample>,
}
