use kanshi_core::notify::port::Notifier;
use kanshi_core::price::entity::{BreachDirection, NewPriceSample, PriceSample};
use kanshi_core::price::error::FeedError;
use kanshi_core::price::port::{PriceFeed, PriceStore};
use kanshi_core::store::error::StoreError;
use kanshi_core::threshold::entity::ThresholdConfig;
use kanshi_core::threshold::port::ThresholdStore;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::task::AbortHandle;
use tracing::{error, info, warn};

/// # Summary
/// 采样周期的统一错误类型。
/// 抓取或落库失败都会使当前周期干净地中止，下一个周期独立重试。
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// # Summary
/// 单个采样周期的结果，仅用于日志与测试观测。
#[derive(Debug, Clone)]
pub struct CycleReport {
    // 本周期落库的样本
    pub sample: PriceSample,
    // 越界方向，价格在区间内时为 None
    pub breach: Option<BreachDirection>,
}

/// # Summary
/// 价格采样器。显式的可调度单元，与任何 HTTP 入口解耦。
///
/// # Invariants
/// - 同一时刻至多一个周期在执行：后台循环串行 await 每个周期，周期超时
///   不会叠加执行（抓取客户端自带有界超时）。
/// - 每个成功周期恰好一次落库写入、至多一次通知尝试。
/// - 通知失败与阈值配置读取失败均为非致命：记录日志，周期继续。
pub struct PriceSampler {
    // 跟踪的币种代码
    coin: String,
    // 行情数据源端口
    feed: Arc<dyn PriceFeed>,
    // 样本存储端口
    store: Arc<dyn PriceStore>,
    // 阈值配置端口，每个周期读取一次
    thresholds: Arc<dyn ThresholdStore>,
    // 告警投递端口
    notifier: Arc<dyn Notifier>,
    // 周期任务句柄，Some 表示循环正在运行
    handle: Mutex<Option<AbortHandle>>,
}

impl PriceSampler {
    /// # Summary
    /// 创建 PriceSampler 实例。
    ///
    /// # Arguments
    /// * `coin` - 跟踪的币种代码。
    /// * `feed` - 行情数据源端口的具体实现。
    /// * `store` - 样本存储端口的具体实现。
    /// * `thresholds` - 阈值配置端口的具体实现。
    /// * `notifier` - 告警投递端口的具体实现。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的采样器实例。
    pub fn new(
        coin: impl Into<String>,
        feed: Arc<dyn PriceFeed>,
        store: Arc<dyn PriceStore>,
        thresholds: Arc<dyn ThresholdStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        Arc::new(Self {
            coin: coin.into(),
            feed,
            store,
            thresholds,
            notifier,
            handle: Mutex::new(None),
        })
    }

    /// # Summary
    /// 执行一个采样周期。
    ///
    /// # Logic
    /// 1. 抓取当前价格；失败时整个周期中止，不写样本也不评估阈值。
    /// 2. 以当前时刻落库一条样本。
    /// 3. 读取阈值配置并评估越界；越界时投递一次告警。
    ///    通知步骤的任何失败只记日志，样本写入不回滚。
    ///
    /// # Returns
    /// * `Result<CycleReport, SamplerError>` - 周期结果或失败原因。
    pub async fn run_cycle(&self) -> Result<CycleReport, SamplerError> {
        let price = self.feed.current_price(&self.coin).await?;

        let sample = self
            .store
            .append(&NewPriceSample::now(self.coin.clone(), price))
            .await?;
        info!(coin = %sample.coin, price = %sample.price, "Sample stored");

        let breach = self.evaluate_and_alert(&sample).await;

        Ok(CycleReport { sample, breach })
    }

    /// # Summary
    /// 阈值评估与告警投递，失败一律降级为日志。
    ///
    /// # Logic
    /// 1. 读取阈值配置；读取失败视为本步骤失败，样本已落库的事实不变。
    /// 2. 价格在 `[min, max]` 闭区间内则无事发生。
    /// 3. 越界时确定方向与被突破的界，向配置的目的地投递一条告警。
    /// 4. 目的地缺失按配置缺失处理：跳过投递并记警告。
    ///
    /// # Arguments
    /// * `sample` - 本周期已落库的样本。
    ///
    /// # Returns
    /// * 越界方向；区间内或评估失败时为 None。
    async fn evaluate_and_alert(&self, sample: &PriceSample) -> Option<BreachDirection> {
        let config = match self.thresholds.get().await {
            Ok(config) => config,
            Err(e) => {
                warn!("Threshold config unavailable, skipping alert check: {e}");
                return None;
            }
        };

        let (direction, threshold) = evaluate_band(sample.price, &config)?;

        let Some(to) = config.alert_destination.as_deref() else {
            warn!(
                coin = %sample.coin,
                %direction,
                "Price breached threshold but no alert destination is configured"
            );
            return Some(direction);
        };

        let subject = format!("{} price alert", sample.coin);
        let content = format!(
            "The price of {} ({} USD) breached the {} threshold of {}.",
            sample.coin, sample.price, direction, threshold
        );

        match self.notifier.notify(to, &subject, &content).await {
            Ok(()) => info!(coin = %sample.coin, %direction, %threshold, "Alert sent"),
            Err(e) => warn!("Alert delivery failed: {e}"),
        }

        Some(direction)
    }

    /// # Summary
    /// 启动周期性采样循环。
    ///
    /// # Logic
    /// 1. 已有循环在运行时直接返回，不会重复启动。
    /// 2. 以 tokio interval 驱动，单任务内串行 await 每个周期，
    ///    周期之间天然互斥。
    /// 3. 周期失败仅记录错误日志，调度器跨周期持续运行。
    ///
    /// # Arguments
    /// * `period` - 采样周期（默认配置 30 秒）。
    pub fn start(self: &Arc<Self>, period: Duration) {
        let mut guard = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        if guard.is_some() {
            warn!("Sampler already running, ignoring start");
            return;
        }

        let sampler = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // 第一次 tick 立即完成，跳过以保持「启动后一个周期才有首个样本」
            interval.tick().await;
            info!(coin = %sampler.coin, period_secs = period.as_secs(), "Sampler started");

            loop {
                interval.tick().await;
                match sampler.run_cycle().await {
                    Ok(report) => {
                        if let Some(direction) = report.breach {
                            info!(%direction, "Cycle completed with breach");
                        }
                    }
                    Err(e) => error!("Sampling cycle failed: {e}"),
                }
            }
        });

        *guard = Some(task.abort_handle());
    }

    /// # Summary
    /// 停止周期性采样循环。幂等：未启动时调用无副作用。
    pub fn stop(&self) {
        let mut guard = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = guard.take() {
            handle.abort();
            info!("Sampler stopped");
        }
    }
}

impl Drop for PriceSampler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// # Summary
/// 对照阈值配置评估价格。
///
/// # Logic
/// `[min, max]` 为含边界区间：恰好等于界值不算越界。
/// 高于 `max` 为 Upper（被突破的界是 `max`），低于 `min` 为 Lower。
///
/// # Arguments
/// * `price` - 待评估的价格。
/// * `config` - 当前阈值配置。
///
/// # Returns
/// * 越界时返回 `(方向, 被突破的界)`，区间内返回 None。
pub fn evaluate_band(price: Decimal, config: &ThresholdConfig) -> Option<(BreachDirection, Decimal)> {
    if price > config.max {
        Some((BreachDirection::Upper, config.max))
    } else if price < config.min {
        Some((BreachDirection::Lower, config.min))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn band(min: Decimal, max: Decimal) -> ThresholdConfig {
        ThresholdConfig {
            min,
            max,
            alert_destination: None,
        }
    }

    #[test]
    fn band_is_inclusive() {
        let config = band(dec!(100), dec!(200));
        assert_eq!(evaluate_band(dec!(100), &config), None);
        assert_eq!(evaluate_band(dec!(200), &config), None);
        assert_eq!(evaluate_band(dec!(150), &config), None);
    }

    #[test]
    fn breach_direction_and_threshold() {
        let config = band(dec!(100), dec!(200));
        assert_eq!(
            evaluate_band(dec!(201), &config),
            Some((BreachDirection::Upper, dec!(200)))
        );
        assert_eq!(
            evaluate_band(dec!(99), &config),
            Some((BreachDirection::Lower, dec!(100)))
        );
    }

    #[test]
    fn default_config_never_breaches() {
        let config = ThresholdConfig::default();
        assert_eq!(evaluate_band(dec!(500000), &config), None);
        assert_eq!(evaluate_band(dec!(-1), &config), None);
    }
}
