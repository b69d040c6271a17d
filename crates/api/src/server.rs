//! # HTTP 服务组装
//!
//! 搭建 axum 路由树、挂载 Swagger UI 与 CORS，并绑定端口对外服务。
//! 进程入口在 `crates/app`：本模块只负责把注入的状态变成一个可运行的服务。

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use kanshi_core::price::port::PriceStore;
use kanshi_core::threshold::port::ThresholdStore;

use crate::routes::{prices, thresholds};

/// 注入到每个 Handler 的共享状态。
///
/// # Invariants
/// - 两个存储句柄由 DI 容器在启动前注入，生命周期与进程等同。
/// - 价格查询 Handler 只读样本存储；与采样器并发共享同一存储，
///   隔离性由 SQLite 保证。
#[derive(Clone)]
pub struct AppState {
    /// 价格样本存储（只读访问）
    pub price_store: Arc<dyn PriceStore>,
    /// 阈值配置存储（读 + 部分更新）
    pub threshold_store: Arc<dyn ThresholdStore>,
}

/// OpenAPI 文档根
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kanshi 价格监控 API",
        version = "0.1.0",
        description = "加密货币价格监控系统的 RESTful API。提供按日期分页的价格历史查询与告警阈值管理。",
        license(name = "MIT")
    ),
    tags(
        (name = "价格 (Prices)", description = "按日期窗口分页查询历史价格样本"),
        (name = "阈值 (Thresholds)", description = "告警区间与投递地址的读取与更新")
    )
)]
pub struct ApiDoc;

/// 构建完整的 axum 路由树。
///
/// 与端口绑定解耦：集成测试用自己的 listener 启动同一棵路由树。
///
/// # Arguments
/// * `state` - 注入的共享状态
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(prices::get_prices))
        .routes(routes!(thresholds::get_thresholds))
        .routes(routes!(thresholds::update_thresholds))
        .with_state(state)
        .split_for_parts();

    // 开发阶段跨域全放行
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 绑定 TCP 端口并常驻服务，直到任务被取消或监听出错。
///
/// # Arguments
/// * `state` - 注入的共享状态
/// * `bind_addr` - 监听地址与端口，如 `"0.0.0.0:8080"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("API server listening on {bind_addr}");
    tracing::info!("Swagger UI at http://{bind_addr}/swagger-ui/");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
