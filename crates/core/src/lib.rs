//! # `kanshi-core` - 领域核心
//!
//! 定义 Kanshi 价格监控系统的共享实体、端口 (Trait) 与错误类型。
//! 本 crate 不包含任何具体实现：SQLite 存储、CoinGecko 行情源、
//! SMTP/Telegram 通知等均在外围 crate 中实现并通过依赖注入组装。

pub mod common;
pub mod config;
pub mod notify;
pub mod price;
pub mod store;
pub mod threshold;
