//! # `kanshi-sampler` - 周期采样与告警
//!
//! 价格监控的后台心脏：以固定周期抓取当前价格、落库样本、
//! 对照阈值配置并在越界时投递告警。
//! 采样器是独立的可调度单元：`run_cycle` 可被同步 await 地单次调用（测试友好），
//! `start`/`stop` 管理周期性后台任务的生命周期。

pub mod sampler;
