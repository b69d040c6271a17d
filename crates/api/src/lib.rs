//! # `kanshi-api` - HTTP API 层
//!
//! 价格监控系统的 HTTP/REST 服务层：`axum` 路由与控制器，
//! `utoipa` 自动生成的 OpenAPI 3.0 / Swagger 文档。
//!
//! 职责范围：
//! - 按日期窗口分页的价格历史查询
//! - 阈值配置的读取与部分更新
//! - 领域模型到 DTO 的转换
//!
//! 查询路径只读样本存储，与采样器完全解耦。

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
