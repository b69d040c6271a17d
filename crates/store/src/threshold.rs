use async_trait::async_trait;
use kanshi_core::store::error::StoreError;
use kanshi_core::threshold::entity::{ThresholdConfig, ThresholdUpdate};
use kanshi_core::threshold::port::ThresholdStore;
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::path::Path;
use std::str::FromStr;

/// 阈值配置数据库文件名
const SETTINGS_DB: &str = "settings.db";

const KEY_MIN: &str = "min";
const KEY_MAX: &str = "max";
const KEY_ALERT_DESTINATION: &str = "alert_destination";

/// ThresholdStore 的 SQLite 实现。
///
/// # Summary
/// 在数据目录下的 `settings.db` 的键值表中持久化 min/max/alert_destination，
/// 跨进程重启生效。
///
/// # Invariants
/// - 读方看到最近一次已提交的写入；`update` 按键逐个写入，不保证跨字段原子性。
/// - 从未写入过的键按 `ThresholdConfig::default()` 补齐（全开区间）。
pub struct SqliteThresholdStore {
    pool: SqlitePool,
}

impl SqliteThresholdStore {
    /// # Summary
    /// 打开（必要时创建）配置数据库并初始化键值表。
    ///
    /// # Logic
    /// 1. 确保数据目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 执行 DDL 创建 `settings` 表。
    ///
    /// # Arguments
    /// * `data_dir` - 数据根目录。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或错误。
    pub async fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::InitError(e.to_string()))?;

        let options = SqliteConnectOptions::new()
            .filename(data_dir.join(SETTINGS_DB))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// 读取单个键，不存在返回 None
    async fn read_key(&self, key: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// 写入单个键
    async fn write_key(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// 将存储的十进制字符串解析回 Decimal
    fn parse_bound(key: &str, raw: &str) -> Result<Decimal, StoreError> {
        Decimal::from_str(raw)
            .map_err(|e| StoreError::Database(format!("bad setting '{key}'='{raw}': {e}")))
    }
}

#[async_trait]
impl ThresholdStore for SqliteThresholdStore {
    /// # Summary
    /// 读取当前阈值配置，缺失的键按默认值补齐。
    ///
    /// # Logic
    /// 1. 逐个读取 min/max/alert_destination 键。
    /// 2. 缺失时回落到 `ThresholdConfig::default()` 的对应字段。
    ///
    /// # Returns
    /// * `Result<ThresholdConfig, StoreError>`
    async fn get(&self) -> Result<ThresholdConfig, StoreError> {
        let defaults = ThresholdConfig::default();

        let min = match self.read_key(KEY_MIN).await? {
            Some(raw) => Self::parse_bound(KEY_MIN, &raw)?,
            None => defaults.min,
        };
        let max = match self.read_key(KEY_MAX).await? {
            Some(raw) => Self::parse_bound(KEY_MAX, &raw)?,
            None => defaults.max,
        };
        let alert_destination = self.read_key(KEY_ALERT_DESTINATION).await?;

        Ok(ThresholdConfig {
            min,
            max,
            alert_destination,
        })
    }

    /// # Summary
    /// 部分更新阈值配置，为 None 的字段保留原值。
    ///
    /// # Logic
    /// 1. 读取当前配置并与更新请求合并。
    /// 2. 按键逐个 `INSERT OR REPLACE` 写回提供的字段。
    ///
    /// # Arguments
    /// * `update` - 部分更新请求。
    ///
    /// # Returns
    /// * `Result<ThresholdConfig, StoreError>` - 合并后的完整配置。
    async fn update(&self, update: &ThresholdUpdate) -> Result<ThresholdConfig, StoreError> {
        let merged = self.get().await?.merged_with(update);

        if let Some(min) = update.min {
            self.write_key(KEY_MIN, &min.to_string()).await?;
        }
        if let Some(max) = update.max {
            self.write_key(KEY_MAX, &max.to_string()).await?;
        }
        if let Some(dest) = &update.alert_destination {
            self.write_key(KEY_ALERT_DESTINATION, dest).await?;
        }

        Ok(merged)
    }
}
