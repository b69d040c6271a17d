use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 查询 API 对外接受的日期格式 (日-月-年)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// 样本展示时间戳格式
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// # Summary
/// 日期解析错误，客户端传入的日期字符串非法（格式错误或不存在的日历日）。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
#[error("Invalid date '{input}', expected DD-MM-YYYY")]
pub struct InvalidDateError {
    // 原始输入，用于错误回显
    pub input: String,
}

/// # Summary
/// 半开日期窗口 `[start, end)`，覆盖单个日历日的整整 24 小时。
/// 由用户传入的 `DD-MM-YYYY` 字符串派生，不做持久化。
///
/// # Invariants
/// - `end` 恒等于 `start + 1 day`。
/// - 恰好落在 `end` 上的时间点不属于窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    // 窗口起点（当日 00:00:00 UTC，含）
    pub start: DateTime<Utc>,
    // 窗口终点（次日 00:00:00 UTC，不含）
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// # Summary
    /// 从 `DD-MM-YYYY` 日期字符串解析出单日窗口。
    ///
    /// # Logic
    /// 1. 按 `%d-%m-%Y` 严格解析日历日，不存在的日期（如 31-02）直接报错。
    /// 2. 取当日 00:00:00 UTC 为起点，次日 00:00:00 UTC 为终点。
    ///
    /// # Arguments
    /// * `input` - 客户端传入的日期字符串。
    ///
    /// # Returns
    /// * 成功返回 `DateWindow`，失败返回 `InvalidDateError`。
    pub fn parse(input: &str) -> Result<Self, InvalidDateError> {
        let day = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| InvalidDateError {
            input: input.to_string(),
        })?;
        let start = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).ok_or_else(|| {
            InvalidDateError {
                input: input.to_string(),
            }
        })?);
        Ok(Self {
            start,
            end: start + Duration::days(1),
        })
    }

    /// 判断时间点是否落在窗口内（左闭右开）
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        let w = DateWindow::parse("01-01-2024").unwrap();
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn window_is_half_open() {
        let w = DateWindow::parse("15-06-2023").unwrap();
        assert!(w.contains(w.start));
        assert!(w.contains(w.end - Duration::seconds(1)));
        assert!(!w.contains(w.end));
    }

    #[test]
    fn rejects_nonexistent_calendar_date() {
        assert!(DateWindow::parse("31-02-2024").is_err());
    }

    #[test]
    fn rejects_wrong_format() {
        assert!(DateWindow::parse("2024-01-01").is_err());
        assert!(DateWindow::parse("").is_err());
    }

    #[test]
    fn leap_day_is_valid() {
        assert!(DateWindow::parse("29-02-2024").is_ok());
        assert!(DateWindow::parse("29-02-2023").is_err());
    }
}
