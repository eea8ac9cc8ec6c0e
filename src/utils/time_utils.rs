// time_utils.rs
//
// 提供報表時間轉換相關的工具函數。
// 主要功能：
// 1. 解析上游報表區間的日期字串（date_start / date_end）
// 2. 在報表本地時間與查詢使用的 UTC 時間之間轉換

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// 上游報表可能使用的日期時間格式
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 帶時區偏移的格式，解析後換算為 UTC
const OFFSET_DATETIME_FORMATS: [&str; 2] = [
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

//
// 報表日期解析
//

/// 解析報表日期字串
///
/// 支援 `2024-01-01 00:00:00`、`2024-01-01T00:00:00`、帶小數秒的變體，
/// 以及僅有日期的 `2024-01-01`（視為當日零點）。
/// 帶 `Z` 或 `+08:00` 等偏移的時間換算為 UTC 後去掉時區。
/// 空字串或無法解析時返回 None。
pub fn parse_report_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 從 JSON 值解析報表日期，非字串值一律視為缺失
pub fn value_to_report_datetime(value: Option<&Value>) -> Option<NaiveDateTime> {
    match value {
        Some(Value::String(s)) => parse_report_datetime(s),
        _ => None,
    }
}

//
// 報表日期 <-> 查詢時間範圍
//

/// 將報表本地時間視為 UTC 轉換為 DateTime<Utc>
pub fn naive_to_utc(dt: &NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(dt)
}

/// 將報表區間的起訖時間轉換為查詢用的 UTC 範圍
pub fn report_range_to_utc_range(
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (naive_to_utc(start), naive_to_utc(end))
}
