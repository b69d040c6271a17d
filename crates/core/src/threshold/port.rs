use super::entity::{ThresholdConfig, ThresholdUpdate};
use crate::store::error::StoreError;
use async_trait::async_trait;

/// # Summary
/// 阈值配置存储接口。显式的读/写 API，取代环境变量式的进程级全局可变状态。
///
/// # Invariants
/// - 读方看到最近一次已提交的写入；不保证跨字段原子性。
/// - 配置必须持久化，进程重启后仍然生效。
/// - 假定同一时刻只有一个写方（管理端），不定义并发更新语义。
#[async_trait]
pub trait ThresholdStore: Send + Sync {
    /// # Summary
    /// 读取当前阈值配置。
    ///
    /// # Returns
    /// 从未写入过时返回 `ThresholdConfig::default()`（全开区间）。
    async fn get(&self) -> Result<ThresholdConfig, StoreError>;

    /// # Summary
    /// 部分更新阈值配置，为 None 的字段保留原值。
    ///
    /// # Arguments
    /// * `update`: 部分更新请求。
    ///
    /// # Returns
    /// 合并后的完整配置或 `StoreError`。
    async fn update(&self, update: &ThresholdUpdate) -> Result<ThresholdConfig, StoreError>;
}
