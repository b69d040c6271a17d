//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use kanshi_core::common::DISPLAY_TIMESTAMP_FORMAT;
use kanshi_core::price::entity::PriceSample;
use kanshi_core::threshold::entity::ThresholdConfig;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================
//  价格查询 DTO
// ============================================================

/// 单条样本的展示记录
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceRecord {
    /// 采样时间，`DD-MM-YYYY HH:MM:SS` 格式
    #[schema(example = "01-01-2024 10:30:00")]
    pub timestamp: String,
    /// 整数截断后的价格 (USD)
    #[schema(example = 64250_i64)]
    pub price: i64,
    /// 币种代码
    #[schema(example = "BTC")]
    pub coin: String,
}

impl From<&PriceSample> for PriceRecord {
    fn from(sample: &PriceSample) -> Self {
        Self {
            timestamp: sample.timestamp.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
            // 展示值按整数截断；超出 i64 的极端价格饱和处理
            price: sample.price.trunc().to_i64().unwrap_or(i64::MAX),
            coin: sample.coin.clone(),
        }
    }
}

/// 分页价格查询响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagedPricesResponse {
    /// 本次查询的规范化 URL（date/offset/limit 显式回显）
    #[schema(example = "/api/v1/prices/BTC?date=01-01-2024&offset=0&limit=100")]
    pub url: String,
    /// 下一页 URL；没有下一页时为哨兵值 "N/A"
    #[schema(example = "/api/v1/prices/BTC?date=01-01-2024&offset=100&limit=100")]
    pub next: String,
    /// 窗口内匹配的真实总数，与分页无关
    #[schema(example = 150_i64)]
    pub count: i64,
    /// 当前页样本
    pub data: Vec<PriceRecord>,
}

/// 没有下一页时 `next` 字段的哨兵值
pub const NO_NEXT_PAGE: &str = "N/A";

// ============================================================
//  阈值配置 DTO
// ============================================================

/// 阈值配置响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThresholdResponse {
    /// 区间下界
    #[schema(example = "20000")]
    pub min: String,
    /// 区间上界
    #[schema(example = "80000")]
    pub max: String,
    /// 告警投递地址
    #[schema(example = "ops@example.com")]
    pub alert_destination: Option<String>,
}

impl From<&ThresholdConfig> for ThresholdResponse {
    fn from(config: &ThresholdConfig) -> Self {
        Self {
            min: config.min.to_string(),
            max: config.max.to_string(),
            alert_destination: config.alert_destination.clone(),
        }
    }
}

/// 阈值配置部分更新请求，缺省字段保留原值。
/// 数值以字符串传输，服务端解析失败返回 400。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateThresholdsRequest {
    /// 新的区间下界
    #[schema(example = "20000")]
    pub min: Option<String>,
    /// 新的区间上界
    #[schema(example = "80000")]
    pub max: Option<String>,
    /// 新的告警投递地址
    #[schema(example = "ops@example.com")]
    pub alert_destination: Option<String>,
}

// ============================================================
//  错误响应 DTO
// ============================================================

/// 统一错误响应体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述
    pub error: String,
}

impl ApiErrorResponse {
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
