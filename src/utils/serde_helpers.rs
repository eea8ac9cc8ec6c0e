// utils/serde_helpers.rs - 金額數值與 JSON 值之間的轉換輔助函數
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::str::FromStr;

/// 將字串解析為 Decimal
///
/// 元數據中的金額通常以字串儲存（例如 `"12.50"`），也可能是空字串。
/// 前後空白會被忽略，空字串或非數值字串返回 None。
///
/// # 使用範例
///
/// ```
/// use stripe_fee_analytics::utils::parse_decimal_str;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_decimal_str("12.50"), Some(dec!(12.50)));
/// assert_eq!(parse_decimal_str(""), None);
/// ```
pub fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// 將 JSON 值轉換為 Decimal
///
/// 數字與數值字串會被轉換，其餘類型（null、布林、陣列、物件）返回 None。
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Decimal::from(u));
            }
            parse_decimal_str(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// 將 Decimal 轉換為 JSON 數字
///
/// 整數金額輸出為整數，其餘輸出為浮點數；無法表示時退回字串。
pub fn decimal_to_value(amount: Decimal) -> Value {
    let normalized = amount.normalize();

    if normalized.scale() == 0 {
        if let Some(i) = normalized.to_i64() {
            return Value::from(i);
        }
    }

    normalized
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(normalized.to_string()))
}
