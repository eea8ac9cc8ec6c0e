use rust_decimal::Decimal;
use serde_json::Value;

use super::container::{Container, Shape};
use super::interval::{Interval, Subtotals, SubtotalsSlot};
use super::order::OrderRecord;

/// 區間列表在營收報表中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalsLocation {
    /// `intervals`
    TopLevel,
    /// `data.intervals`
    Nested,
}

/// 營收報表查詢結果
///
/// 區間可能位於頂層 `intervals` 或 `data.intervals`，總計位於頂層 `totals`。
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueReport {
    fields: Container,
    data: Option<Container>,
    location: IntervalsLocation,
    intervals: Vec<Interval>,
    totals: SubtotalsSlot,
}

impl RevenueReport {
    /// 以指定結構建立報表（區間位於頂層）
    pub fn new(shape: Shape, intervals: Vec<Interval>) -> Self {
        Self {
            fields: Container::new(shape),
            data: None,
            location: IntervalsLocation::TopLevel,
            intervals,
            totals: SubtotalsSlot::Absent,
        }
    }

    /// 設定總計
    pub fn with_totals(mut self, totals: Subtotals) -> Self {
        self.totals = SubtotalsSlot::Present(totals);
        self
    }

    /// 從上游 JSON 值建立報表
    ///
    /// 結果不是容器、找不到區間列表，或區間不是陣列時，原值退回給呼叫方。
    pub fn from_value(value: Value) -> Result<Self, Value> {
        let fields = Container::from_value(value)?;

        let top_level = match fields.get("intervals") {
            Some(Value::Array(items)) => Some(items.clone()),
            _ => None,
        };
        if let Some(items) = top_level {
            let totals = SubtotalsSlot::from_value(fields.get("totals").cloned());
            return Ok(Self {
                fields,
                data: None,
                location: IntervalsLocation::TopLevel,
                intervals: items.into_iter().map(Interval::from_value).collect(),
                totals,
            });
        }

        // 頂層 intervals 為 null 或不存在時才查找 data.intervals
        let top_level_unset = matches!(fields.get("intervals"), None | Some(Value::Null));
        let data = match fields.get("data") {
            Some(data) if top_level_unset => Container::from_value(data.clone()).ok(),
            _ => None,
        };
        let Some(data) = data else {
            return Err(fields.into_value());
        };

        let items = match data.get("intervals") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(fields.into_value()),
        };
        let totals = SubtotalsSlot::from_value(fields.get("totals").cloned());

        Ok(Self {
            fields,
            data: Some(data),
            location: IntervalsLocation::Nested,
            intervals: items.into_iter().map(Interval::from_value).collect(),
            totals,
        })
    }

    pub fn shape(&self) -> Shape {
        self.fields.shape()
    }

    pub fn location(&self) -> IntervalsLocation {
        self.location
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn intervals_mut(&mut self) -> &mut [Interval] {
        &mut self.intervals
    }

    pub fn totals(&self) -> Option<&Subtotals> {
        self.totals.get()
    }

    /// 取得可寫入的總計，缺失時以報表結構建立
    pub fn totals_mut(&mut self) -> Option<&mut Subtotals> {
        let shape = self.shape();
        self.totals.get_or_create(shape)
    }

    /// 所有區間 `stripe_fee` 小計之和
    pub fn interval_fee_sum(&self) -> Decimal {
        self.intervals.iter().filter_map(Interval::stripe_fee).sum()
    }

    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        let intervals = Value::Array(self.intervals.into_iter().map(Interval::into_value).collect());

        match (self.location, self.data) {
            (IntervalsLocation::Nested, Some(mut data)) => {
                data.insert("intervals", intervals);
                fields.insert("data", data.into_value());
            }
            _ => {
                fields.insert("intervals", intervals);
            }
        }

        self.totals.write_into(&mut fields, "totals");
        fields.into_value()
    }
}

/// 訂單報表查詢結果，資料列位於 `data`
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersReport {
    fields: Container,
    rows: Vec<OrderRecord>,
}

impl OrdersReport {
    pub fn new(rows: Vec<OrderRecord>) -> Self {
        Self {
            fields: Container::new(Shape::Record),
            rows,
        }
    }

    /// 從上游 JSON 值建立報表
    ///
    /// `data` 不是陣列，或任一資料列不是容器時，原值退回給呼叫方。
    pub fn from_value(value: Value) -> Result<Self, Value> {
        let fields = Container::from_value(value)?;

        let items = match fields.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(fields.into_value()),
        };

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            match Container::from_value(item) {
                Ok(columns) => rows.push(OrderRecord::from_container(columns)),
                Err(_) => return Err(fields.into_value()),
            }
        }

        Ok(Self { fields, rows })
    }

    pub fn rows(&self) -> &[OrderRecord] {
        &self.rows
    }

    /// 取出資料列以便處理，處理後以 `set_rows` 放回
    pub fn take_rows(&mut self) -> Vec<OrderRecord> {
        std::mem::take(&mut self.rows)
    }

    pub fn set_rows(&mut self, rows: Vec<OrderRecord>) {
        self.rows = rows;
    }

    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        let rows = Value::Array(self.rows.into_iter().map(OrderRecord::into_value).collect());
        fields.insert("data", rows);
        fields.into_value()
    }
}
