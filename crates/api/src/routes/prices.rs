//! # 价格历史查询控制器
//!
//! 只读路径：从样本存储按单日窗口分页读取，绝不触碰行情源或通知层。

use axum::Json;
use axum::extract::{Path, Query, State};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{NO_NEXT_PAGE, PagedPricesResponse, PriceRecord};
use kanshi_core::common::DateWindow;

/// 查询参数；`date` 必填，分页参数带默认值
#[derive(Deserialize, ToSchema)]
pub struct PricesQuery {
    pub date: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// 默认页大小
const DEFAULT_LIMIT: i64 = 100;

/// 构建回显 date/offset/limit 的规范化查询 URL。
/// `coin` 来自路径段且可能含保留字符，回显前做百分号编码；
/// `date` 此时已通过 DD-MM-YYYY 解析，只含数字与连字符。
fn query_url(coin: &str, date: &str, offset: i64, limit: i64) -> String {
    let coin = utf8_percent_encode(coin, NON_ALPHANUMERIC);
    format!("/api/v1/prices/{coin}?date={date}&offset={offset}&limit={limit}")
}

/// 查询某币种在指定日期的价格样本（分页）
///
/// `count` 始终为窗口内匹配的真实总数；`next` 在还有下一页时
/// 把 offset 前移一页，否则为哨兵值 "N/A"。
/// `limit` 不设上限：调用方可以请求任意大的页，这是一个已知的
/// 资源耗尽风险，按约定不做静默截断。
#[utoipa::path(
    get,
    path = "/api/v1/prices/{coin}",
    tag = "价格 (Prices)",
    params(
        ("coin" = String, Path, description = "币种代码，精确匹配 (例如: BTC)"),
        ("date" = String, Query, description = "查询的日历日，DD-MM-YYYY"),
        ("offset" = Option<i64>, Query, description = "跳过的行数，默认 0"),
        ("limit" = Option<i64>, Query, description = "页大小，默认 100，无上限")
    ),
    responses(
        (status = 200, description = "分页样本列表", body = PagedPricesResponse),
        (status = 400, description = "date 缺失或不是合法的 DD-MM-YYYY 日期")
    )
)]
pub async fn get_prices(
    State(state): State<AppState>,
    Path(coin): Path<String>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PagedPricesResponse>, ApiError> {
    let date = query
        .date
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("date query parameter is required".to_string()))?;
    let window = DateWindow::parse(date)?;

    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if offset < 0 || limit < 0 {
        return Err(ApiError::BadRequest(
            "offset and limit must be non-negative".to_string(),
        ));
    }

    let page = state
        .price_store
        .query_window(&coin, &window, offset, limit)
        .await?;

    // offset/limit 无上限，求和可能溢出 i64：溢出的页必然越过末尾，按无下一页处理
    let next = match offset.checked_add(limit) {
        Some(end) if end < page.count => query_url(&coin, date, end, limit),
        _ => NO_NEXT_PAGE.to_string(),
    };

    Ok(Json(PagedPricesResponse {
        url: query_url(&coin, date, offset, limit),
        next,
        count: page.count,
        data: page.samples.iter().map(PriceRecord::from).collect(),
    }))
}
