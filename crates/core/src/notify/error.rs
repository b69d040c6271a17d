use thiserror::Error;

/// # Summary
/// 告警投递错误枚举。对采样周期而言投递失败永远是非致命的：
/// 调用方记录日志后周期继续，样本写入不受影响。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 传输层失败 (连接、超时、SMTP 会话中断)
    #[error("Delivery transport error: {0}")]
    Network(String),
    /// 凭据或地址配置非法 (坏的 SMTP 主机、不可解析的收件地址)
    #[error("Delivery config error: {0}")]
    Config(String),
    /// 投递平台拒绝 (SMTP 拒信、Telegram API 非 2xx)
    #[error("Delivery rejected: {0}")]
    Platform(String),
}
