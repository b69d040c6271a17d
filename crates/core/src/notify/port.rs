use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 告警投递端口。采样器在价格越界时调用，传输细节由实现决定。
///
/// # Invariants
/// - 实现必须 `Send + Sync`，可被后台任务并发调用。
/// - 整个投递过程必须可无人值守运行：不得阻塞等待交互式输入，
///   失败以 `NotifyError` 返回而不是挂起。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 向 `to` 投递一条带主题的告警。
    ///
    /// # Arguments
    /// * `to` - 投递目的地，按传输解释：Email 地址或 Telegram Chat ID。
    /// * `subject` - 告警主题。
    /// * `content` - 告警正文。
    ///
    /// # Returns
    /// 投递成功返回 `Ok(())`，任何传输或平台失败返回 `NotifyError`。
    async fn notify(&self, to: &str, subject: &str, content: &str) -> Result<(), NotifyError>;
}
