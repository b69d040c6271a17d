//! # `kanshi-notify` - 告警投递层
//!
//! `kanshi-core` 中 `Notifier` 端口的两种传输实现：SMTP 邮件与 Telegram Bot。
//! 投递目的地按次传入（来自阈值配置的 `alert_destination`），传输凭据在构造时注入。

pub mod email;
pub mod telegram;
