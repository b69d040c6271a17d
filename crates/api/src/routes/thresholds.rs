//! # 阈值配置控制器
//!
//! 管理端接口：读取当前告警区间、部分更新 min/max/投递地址。
//! 更新的字段落库持久，缺省字段保留原值。

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ThresholdResponse, UpdateThresholdsRequest};
use kanshi_core::threshold::entity::ThresholdUpdate;

/// 读取当前阈值配置
#[utoipa::path(
    get,
    path = "/api/v1/thresholds",
    tag = "阈值 (Thresholds)",
    responses(
        (status = 200, description = "当前阈值配置", body = ThresholdResponse)
    )
)]
pub async fn get_thresholds(
    State(state): State<AppState>,
) -> Result<Json<ThresholdResponse>, ApiError> {
    let config = state.threshold_store.get().await?;
    Ok(Json(ThresholdResponse::from(&config)))
}

/// 将请求中的十进制字符串解析为 Decimal，失败视为客户端错误
fn parse_bound(field: &str, raw: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("{field} must be a decimal number, got '{raw}'")))
}

/// 部分更新阈值配置
///
/// 请求体中缺省的字段保留原值；min/max 必须可解析为十进制数。
/// 超出「可解析」之外不做数值校验（例如不强制 min <= max），
/// 与既有行为保持一致。
#[utoipa::path(
    put,
    path = "/api/v1/thresholds",
    tag = "阈值 (Thresholds)",
    request_body = UpdateThresholdsRequest,
    responses(
        (status = 200, description = "合并后的完整配置", body = ThresholdResponse),
        (status = 400, description = "min/max 不是合法的十进制数")
    )
)]
pub async fn update_thresholds(
    State(state): State<AppState>,
    Json(req): Json<UpdateThresholdsRequest>,
) -> Result<Json<ThresholdResponse>, ApiError> {
    let update = ThresholdUpdate {
        min: req
            .min
            .as_deref()
            .map(|raw| parse_bound("min", raw))
            .transpose()?,
        max: req
            .max
            .as_deref()
            .map(|raw| parse_bound("max", raw))
            .transpose()?,
        alert_destination: req.alert_destination,
    };

    tracing::info!(
        min = ?update.min,
        max = ?update.max,
        "Updating alert thresholds"
    );

    let merged = state.threshold_store.update(&update).await?;
    Ok(Json(ThresholdResponse::from(&merged)))
}
