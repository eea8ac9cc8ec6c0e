use rust_decimal::Decimal;
use serde_json::Value;
use std::io::Write;
use tracing::debug;

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::net_fees::net_after_fees;
use crate::domain_types::{
    ExportColumns, ExportItem, Interval, OrderRecord, NET_AFTER_FEES_KEY, STRIPE_FEE_KEY,
};
use crate::utils::decimal_to_value;

/// 在匯出欄位定義中加上費用欄位
pub fn append_fee_column(columns: &mut ExportColumns, key: &str, label: &str) {
    columns.set(key, label);
}

/// 在匯出欄位定義中加上扣除費用後淨額欄位
pub fn append_net_after_fees_column(columns: &mut ExportColumns, label: &str) {
    columns.set(NET_AFTER_FEES_KEY, label);
}

/// 訂單匯出資料加上已註記的費用，未註記時為 0
pub fn prepare_orders_export_item(mut item: ExportItem, record: &OrderRecord) -> ExportItem {
    let fee = record.stripe_fee().unwrap_or(Decimal::ZERO);
    item.insert(STRIPE_FEE_KEY.to_string(), decimal_to_value(fee));
    item
}

/// 營收匯出資料加上區間的 `subtotals.stripe_fee`，未彙總時為 0
pub fn prepare_revenue_export_item(mut item: ExportItem, interval: &Interval) -> ExportItem {
    let fee = interval.stripe_fee().unwrap_or(Decimal::ZERO);
    item.insert(STRIPE_FEE_KEY.to_string(), decimal_to_value(fee));
    item
}

/// 匯出資料加上扣除費用後淨額
pub fn prepare_net_after_fees_item(mut item: ExportItem, net_total: Decimal, stripe_fee: Decimal) -> ExportItem {
    item.insert(
        NET_AFTER_FEES_KEY.to_string(),
        decimal_to_value(net_after_fees(net_total, stripe_fee)),
    );
    item
}

/// CSV 匯出器
///
/// 第一列為欄位標籤，之後每筆資料依欄位定義的鍵順序輸出；缺少的鍵輸出空字串。
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    columns: ExportColumns,
    rows_written: usize,
}

impl<W: Write> CsvExporter<W> {
    /// 創建匯出器並寫入標題列
    pub fn new(inner: W, columns: ExportColumns) -> AnalyticsResult<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(columns.labels())?;

        Ok(Self {
            writer,
            columns,
            rows_written: 0,
        })
    }

    pub fn write_item(&mut self, item: &ExportItem) -> AnalyticsResult<()> {
        let record: Vec<String> = self
            .columns
            .keys()
            .map(|key| cell_text(item.get(key)))
            .collect();

        self.writer.write_record(&record)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, items: I) -> AnalyticsResult<()>
    where
        I: IntoIterator<Item = &'a ExportItem>,
    {
        for item in items {
            self.write_item(item)?;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// 完成匯出並取回底層寫入器
    pub fn finish(mut self) -> AnalyticsResult<W> {
        self.writer.flush()?;
        debug!(rows = self.rows_written, columns = self.columns.len(), "CSV 匯出完成");
        self.writer
            .into_inner()
            .map_err(|e| AnalyticsError::Io(e.into_error()))
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}
