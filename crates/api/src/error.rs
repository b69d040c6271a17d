//! # API 统一错误处理
//!
//! 把领域层错误归一到三类 HTTP 结果：客户端参数错误 (400)、
//! 资源不存在 (404)、内部错误 (500)。内部错误只落日志，
//! 响应体不向客户端透传细节。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ApiErrorResponse;
use kanshi_core::common::InvalidDateError;
use kanshi_core::store::error::StoreError;

/// HTTP 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数非法 (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 资源不存在 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 下层失败 (500)，细节仅落日志
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                tracing::error!("内部服务错误: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiErrorResponse::from_msg(message))).into_response()
    }
}

/// 非法日期是客户端错误，存储层不会被触碰
impl From<InvalidDateError> for ApiError {
    fn from(err: InvalidDateError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// 存储层错误映射：记录缺失走 404，其余一律按内部错误处理
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound => ApiError::NotFound(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
