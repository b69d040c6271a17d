use thiserror::Error;

/// # Summary
/// 行情抓取错误枚举。任何变体都会让当前采样周期中止，
/// 由下一个周期独立重试。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP 传输失败或上游返回非 2xx/404 状态
    #[error("Feed transport error: {0}")]
    Network(String),
    /// 响应体结构与预期不符
    #[error("Feed response parse error: {0}")]
    Parse(String),
    /// 上游不认识请求的币种 (404)
    #[error("Coin not found: {0}")]
    NotFound(String),
    /// 未分类的抓取错误
    #[error("Feed error: {0}")]
    Unknown(String),
}
