//! # `kanshi-store` - SQLite 持久化层
//!
//! `kanshi-core` 存储端口的 SQLite (sqlx) 实现：
//! - [`price::SqlitePriceStore`] 追加型价格样本表与窗口化分页查询
//! - [`threshold::SqliteThresholdStore`] 键值式阈值配置，跨重启持久
//!
//! 数据目录在构造时显式传入，不依赖任何进程级全局状态。

pub mod price;
pub mod threshold;
