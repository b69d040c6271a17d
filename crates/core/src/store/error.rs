use thiserror::Error;

/// # Summary
/// 持久层错误枚举，覆盖数据库打开、读写与行解码失败。
/// 样本存储与阈值存储共用本枚举，错误信息携带定位用的上下文。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 打开或初始化数据库失败（目录创建、连接、DDL）
    #[error("Store init failed: {0}")]
    InitError(String),
    /// SQL 执行或行解码失败
    #[error("Store query failed: {0}")]
    Database(String),
    /// 请求的记录不存在
    #[error("Record not found")]
    NotFound,
    /// 未分类的存储错误
    #[error("Store error: {0}")]
    Unknown(String),
}
