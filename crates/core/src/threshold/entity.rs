use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 告警阈值配置，采样器每个周期读取一次。
///
/// # Invariants
/// - `[min, max]` 为含边界的正常区间，价格落在区间外即为越界。
/// - `alert_destination` 为 None 时跳过通知步骤（记录告警日志）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    // 区间下界
    pub min: Decimal,
    // 区间上界
    pub max: Decimal,
    // 告警投递地址（Email 地址或 Telegram Chat ID，由传输层解释）
    pub alert_destination: Option<String>,
}

impl Default for ThresholdConfig {
    /// 缺省为全开区间，配置完成前不会触发任何告警
    fn default() -> Self {
        Self {
            min: Decimal::MIN,
            max: Decimal::MAX,
            alert_destination: None,
        }
    }
}

/// # Summary
/// 阈值配置的部分更新请求，为 None 的字段保留原值。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdUpdate {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub alert_destination: Option<String>,
}

impl ThresholdConfig {
    /// 将部分更新合并到当前配置上，未提供的字段保留原值
    pub fn merged_with(&self, update: &ThresholdUpdate) -> Self {
        Self {
            min: update.min.unwrap_or(self.min),
            max: update.max.unwrap_or(self.max),
            alert_destination: update
                .alert_destination
                .clone()
                .or_else(|| self.alert_destination.clone()),
        }
    }
}
