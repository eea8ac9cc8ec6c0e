use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::Value;

use super::container::{Container, Shape};
use super::STRIPE_FEE_KEY;
use crate::utils::{decimal_from_value, decimal_to_value, value_to_report_datetime};

/// 區間小計
///
/// 指標鍵到金額的對應，寫入時沿用到達時的容器結構。
#[derive(Debug, Clone, PartialEq)]
pub struct Subtotals {
    fields: Container,
}

impl Subtotals {
    /// 創建指定結構的空小計
    pub fn new(shape: Shape) -> Self {
        Self {
            fields: Container::new(shape),
        }
    }

    pub fn from_container(fields: Container) -> Self {
        Self { fields }
    }

    pub fn shape(&self) -> Shape {
        self.fields.shape()
    }

    /// 讀取指定指標的金額，缺失或非數值時為 None
    pub fn get_decimal(&self, key: &str) -> Option<Decimal> {
        self.fields.get(key).and_then(decimal_from_value)
    }

    /// 寫入指定指標的金額
    pub fn set_decimal(&mut self, key: impl Into<String>, amount: Decimal) {
        self.fields.insert(key, decimal_to_value(amount));
    }

    /// 讀取 `stripe_fee` 小計
    pub fn stripe_fee(&self) -> Option<Decimal> {
        self.get_decimal(STRIPE_FEE_KEY)
    }

    /// 寫入 `stripe_fee` 小計
    pub fn set_stripe_fee(&mut self, fee: Decimal) {
        self.set_decimal(STRIPE_FEE_KEY, fee);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn container(&self) -> &Container {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        self.fields.into_value()
    }
}

/// 小計欄位的三種狀態
#[derive(Debug, Clone, PartialEq)]
pub enum SubtotalsSlot {
    /// 未提供（或為 null），需要時以父層結構建立
    Absent,
    /// 有效的小計容器
    Present(Subtotals),
    /// 非容器的純量值，原樣保留且不寫入
    Opaque(Value),
}

impl SubtotalsSlot {
    /// 從上游欄位值建立
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => SubtotalsSlot::Absent,
            Some(value) => match Container::from_value(value) {
                Ok(container) => SubtotalsSlot::Present(Subtotals::from_container(container)),
                Err(raw) => SubtotalsSlot::Opaque(raw),
            },
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, SubtotalsSlot::Opaque(_))
    }

    pub fn get(&self) -> Option<&Subtotals> {
        match self {
            SubtotalsSlot::Present(subtotals) => Some(subtotals),
            _ => None,
        }
    }

    /// 取得可寫入的小計，缺失時以指定結構建立；純量值無法寫入，返回 None
    pub fn get_or_create(&mut self, shape: Shape) -> Option<&mut Subtotals> {
        if matches!(self, SubtotalsSlot::Absent) {
            *self = SubtotalsSlot::Present(Subtotals::new(shape));
        }

        match self {
            SubtotalsSlot::Present(subtotals) => Some(subtotals),
            _ => None,
        }
    }

    fn into_value(self) -> Option<Value> {
        match self {
            SubtotalsSlot::Absent => None,
            SubtotalsSlot::Present(subtotals) => Some(subtotals.into_value()),
            SubtotalsSlot::Opaque(raw) => Some(raw),
        }
    }

    /// 將小計寫回父層容器，保持鍵的原始位置
    pub(crate) fn write_into(self, parent: &mut Container, key: &str) {
        if let Some(value) = self.into_value() {
            parent.insert(key, value);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum IntervalBody {
    Fields(Container),
    Opaque(Value),
}

/// 報表時間區間
///
/// 日期在建立時解析一次；除 `subtotals` 外的其他欄位原樣保留。
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    body: IntervalBody,
    subtotals: SubtotalsSlot,
    date_start: Option<NaiveDateTime>,
    date_end: Option<NaiveDateTime>,
}

impl Interval {
    /// 以指定結構建立區間
    pub fn new(
        shape: Shape,
        date_start: Option<NaiveDateTime>,
        date_end: Option<NaiveDateTime>,
    ) -> Self {
        let mut fields = Container::new(shape);
        if let Some(start) = date_start {
            fields.insert("date_start", Value::String(format_report_datetime(&start)));
        }
        if let Some(end) = date_end {
            fields.insert("date_end", Value::String(format_report_datetime(&end)));
        }

        Self {
            body: IntervalBody::Fields(fields),
            subtotals: SubtotalsSlot::Absent,
            date_start,
            date_end,
        }
    }

    /// 從上游 JSON 值建立區間，非容器值作為不透明區間原樣傳遞
    pub fn from_value(value: Value) -> Self {
        match Container::from_value(value) {
            Ok(fields) => Self::from_container(fields),
            Err(raw) => Self {
                body: IntervalBody::Opaque(raw),
                subtotals: SubtotalsSlot::Absent,
                date_start: None,
                date_end: None,
            },
        }
    }

    pub fn from_container(fields: Container) -> Self {
        let date_start = value_to_report_datetime(fields.get("date_start"));
        let date_end = value_to_report_datetime(fields.get("date_end"));
        let subtotals = SubtotalsSlot::from_value(fields.get("subtotals").cloned());

        Self {
            body: IntervalBody::Fields(fields),
            subtotals,
            date_start,
            date_end,
        }
    }

    /// 設定小計
    pub fn with_subtotals(mut self, subtotals: Subtotals) -> Self {
        self.subtotals = SubtotalsSlot::Present(subtotals);
        self
    }

    /// 附加欄位
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        if let IntervalBody::Fields(fields) = &mut self.body {
            fields.insert(key, value);
        }
        self
    }

    pub fn date_start(&self) -> Option<NaiveDateTime> {
        self.date_start
    }

    pub fn date_end(&self) -> Option<NaiveDateTime> {
        self.date_end
    }

    /// 起訖時間皆存在時返回區間範圍
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.date_start?, self.date_end?))
    }

    /// 區間結構，不透明區間為 None
    pub fn shape(&self) -> Option<Shape> {
        match &self.body {
            IntervalBody::Fields(fields) => Some(fields.shape()),
            IntervalBody::Opaque(_) => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.body, IntervalBody::Opaque(_))
    }

    /// 區間標籤（例如 `2024-01`）
    pub fn label(&self) -> Option<&str> {
        self.field("interval").and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        match &self.body {
            IntervalBody::Fields(fields) => fields.get(key),
            IntervalBody::Opaque(_) => None,
        }
    }

    pub fn subtotals(&self) -> Option<&Subtotals> {
        self.subtotals.get()
    }

    /// 取得可寫入的小計
    ///
    /// 缺少小計時以區間本身的結構建立；不透明區間或純量小計返回 None。
    pub fn subtotals_mut(&mut self) -> Option<&mut Subtotals> {
        let shape = self.shape()?;
        self.subtotals.get_or_create(shape)
    }

    /// 小計是否可寫入（不透明區間或純量小計為 false）
    pub fn subtotals_writable(&self) -> bool {
        !self.is_opaque() && !self.subtotals.is_opaque()
    }

    /// 已寫入的 `stripe_fee` 小計
    pub fn stripe_fee(&self) -> Option<Decimal> {
        self.subtotals().and_then(Subtotals::stripe_fee)
    }

    pub fn into_value(self) -> Value {
        match self.body {
            IntervalBody::Fields(mut fields) => {
                self.subtotals.write_into(&mut fields, "subtotals");
                fields.into_value()
            }
            IntervalBody::Opaque(raw) => raw,
        }
    }
}

fn format_report_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_report_datetime;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_interval_parses_dates() {
        let interval = Interval::from_value(json!({
            "interval": "2024-01",
            "date_start": "2024-01-01 00:00:00",
            "date_end": "2024-01-31 23:59:59",
            "subtotals": {"orders_count": 3}
        }));

        assert_eq!(interval.label(), Some("2024-01"));
        assert_eq!(interval.date_start(), parse_report_datetime("2024-01-01 00:00:00"));
        assert_eq!(interval.date_end(), parse_report_datetime("2024-01-31 23:59:59"));
        assert_eq!(interval.shape(), Some(Shape::Record));
        assert!(interval.date_range().is_some());
    }

    #[test]
    fn test_missing_subtotals_created_in_parent_shape() {
        let mut keyed = Interval::from_value(json!([["date_start", "2024-01-01"]]));
        keyed.subtotals_mut().unwrap().set_stripe_fee(dec!(2.5));
        assert_eq!(
            keyed.into_value(),
            json!([["date_start", "2024-01-01"], ["subtotals", [["stripe_fee", 2.5]]]])
        );

        let mut record = Interval::from_value(json!({"date_start": "2024-01-01"}));
        record.subtotals_mut().unwrap().set_stripe_fee(dec!(2.5));
        assert_eq!(
            record.into_value(),
            json!({"date_start": "2024-01-01", "subtotals": {"stripe_fee": 2.5}})
        );
    }

    #[test]
    fn test_subtotals_writable_without_mutation() {
        let absent = Interval::from_value(json!({"date_start": "2024-01-01"}));
        assert!(absent.subtotals_writable());
        assert!(absent.subtotals().is_none());

        let keyed = Interval::from_value(json!([["subtotals", [["orders_count", 1]]]]));
        assert!(keyed.subtotals_writable());

        let null = Interval::from_value(json!({"subtotals": null}));
        assert!(null.subtotals_writable());
    }

    #[test]
    fn test_existing_subtotals_keep_their_own_shape() {
        let mut interval = Interval::from_value(json!({
            "date_start": "2024-01-01",
            "subtotals": [["net_revenue", 10]]
        }));
        interval.subtotals_mut().unwrap().set_stripe_fee(dec!(1));

        assert_eq!(
            interval.into_value(),
            json!({"date_start": "2024-01-01", "subtotals": [["net_revenue", 10], ["stripe_fee", 1]]})
        );
    }

    #[test]
    fn test_scalar_subtotals_not_writable() {
        let mut interval = Interval::from_value(json!({"subtotals": "n/a"}));
        assert!(!interval.subtotals_writable());
        assert!(interval.subtotals_mut().is_none());
        assert_eq!(interval.into_value(), json!({"subtotals": "n/a"}));
    }

    #[test]
    fn test_opaque_interval_passes_through() {
        let mut interval = Interval::from_value(json!("broken"));
        assert!(interval.is_opaque());
        assert!(!interval.subtotals_writable());
        assert!(interval.date_range().is_none());
        assert!(interval.subtotals_mut().is_none());
        assert_eq!(interval.into_value(), json!("broken"));
    }

    #[test]
    fn test_new_interval_writes_dates() {
        let start = parse_report_datetime("2024-03-01").unwrap();
        let interval = Interval::new(Shape::Record, Some(start), None);
        assert_eq!(interval.into_value(), json!({"date_start": "2024-03-01 00:00:00"}));
    }
}
