// utils.rs - 公共工具模組
//
// 提供報表日期解析與金額轉換的輔助函數，供分析層與儲存層共用。

pub mod serde_helpers;
pub mod time_utils;

// 重新導出常用工具函數，使其可以通過 utils::function_name 直接訪問
pub use serde_helpers::{decimal_from_value, decimal_to_value, parse_decimal_str};
pub use time_utils::{
    // 報表日期解析
    parse_report_datetime,
    value_to_report_datetime,

    // 報表日期 <-> 查詢時間範圍
    naive_to_utc,
    report_range_to_utc_range,
};
