use chrono::{DateTime, Local, TimeZone, Utc};

/// 导出文件名使用的时间戳（Unix 毫秒）
#[inline]
pub fn epoch_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// 带时间戳的导出文件名，例如 `interconnect-test-results-1714564800000.csv`
pub fn timestamped_file_name(prefix: &str, dt: DateTime<Utc>, extension: &str) -> String {
    format!("{}-{}.{}", prefix, epoch_millis(dt), extension)
}

/// 将任意时区 DateTime 格式化为本地时间字符串
#[inline]
pub fn format_local<Tz: TimeZone>(dt: DateTime<Tz>, fmt: &str) -> String {
    dt.with_timezone(&Local).format(fmt).to_string()
}
