use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kanshi_api::server::{AppState, start_server};
use kanshi_core::config::{AppConfig, NotifyTransport};
use kanshi_core::notify::port::Notifier;
use kanshi_feed::coingecko::CoinGeckoProvider;
use kanshi_notify::email::EmailNotifier;
use kanshi_notify::telegram::TelegramNotifier;
use kanshi_sampler::sampler::PriceSampler;
use kanshi_store::price::SqlitePriceStore;
use kanshi_store::threshold::SqliteThresholdStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// # Summary
/// 加载应用配置：默认值 < `kanshi.toml` < `KANSHI_*` 环境变量。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 的 serde 默认值兜底。
/// 2. 叠加可选的 `kanshi.toml` 配置文件。
/// 3. 叠加 `KANSHI_` 前缀的环境变量（`__` 分隔嵌套层级）。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("kanshi").required(false))
        .add_source(config::Environment::with_prefix("KANSHI").separator("__"))
        .build()?
        .try_deserialize::<AppConfig>()
}

/// # Summary
/// 根据配置选择告警传输实现。
///
/// # Logic
/// * `email`: SMTP 凭据来自配置；投递地址由阈值配置在发送时提供。
/// * `telegram`: Bot Token 来自配置；Chat ID 同样来自阈值配置。
fn build_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, Box<dyn std::error::Error>> {
    let notify = &config.notify;
    match notify.transport {
        NotifyTransport::Email => {
            let notifier = EmailNotifier::new(
                &notify.smtp_host,
                &notify.smtp_user,
                &notify.smtp_pass,
                &notify.sender,
            )?;
            Ok(Arc::new(notifier))
        }
        NotifyTransport::Telegram => Ok(Arc::new(TelegramNotifier::new(
            notify.telegram_bot_token.clone(),
        ))),
    }
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到采样器与 API 层。
///
/// # Logic
/// 1. 初始化全局日志与配置。
/// 2. 实例化基础设施层（Store、Feed、Notifier）。
/// 3. 构造并启动周期采样器。
/// 4. 启动 HTTP 服务，等待退出信号后停止采样器。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // reqwest 以 rustls-no-provider 编译：构建任何 HTTP 客户端之前
    // 必须为进程装好一个 CryptoProvider。重复安装只在测试场景出现，忽略即可。
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();

    // 1. 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Kanshi price monitor starting...");

    let config = load_config()?;

    // 2. 实例化基础设施层
    let data_dir = PathBuf::from(&config.database.data_dir);
    let price_store = Arc::new(SqlitePriceStore::new(&data_dir).await?);
    let threshold_store = Arc::new(SqliteThresholdStore::new(&data_dir).await?);
    let feed = Arc::new(CoinGeckoProvider::with_base_url(
        config.sampler.feed_base_url.clone(),
    )?);
    let notifier = build_notifier(&config)?;

    // 3. 构造并启动采样器
    let sampler = PriceSampler::new(
        config.sampler.coin.clone(),
        feed,
        price_store.clone(),
        threshold_store.clone(),
        notifier,
    );
    sampler.start(Duration::from_secs(config.sampler.interval_secs));

    // 4. 启动 HTTP 服务，等待外部退出信号
    let state = AppState {
        price_store,
        threshold_store,
    };
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tokio::select! {
        result = start_server(state, &bind_addr) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting...");
        }
    }

    sampler.stop();
    Ok(())
}
