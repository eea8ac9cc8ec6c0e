use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analytics::aggregator::{AggregationOutcome, IntervalAggregator};
use crate::analytics::annotator::FeeAnnotator;
use crate::analytics::chart::append_stripe_fee_chart;
use crate::analytics::error::AnalyticsResult;
use crate::analytics::export::{
    append_fee_column, append_net_after_fees_column, prepare_net_after_fees_item,
    prepare_orders_export_item, prepare_revenue_export_item,
};
use crate::analytics::settings::PipelineSettings;
use crate::analytics::table::augment_table;
use crate::config::ApplicationConfig;
use crate::domain_types::{
    ChartConfig, Container, ExportColumns, ExportItem, Interval, OrderRecord, OrdersReport,
    ReportTable, RevenueReport, STRIPE_FEE_KEY,
};
use crate::storage::{FeeLookup, OrderQuery};

/// 報表處理服務
///
/// 由宿主的報表流程在各階段直接呼叫：查詢結果註記、匯出欄位、圖表與表格。
/// 每次呼叫只處理傳入的報表，不保留任何請求間狀態。
pub struct ReportPipeline {
    settings: PipelineSettings,
    annotator: FeeAnnotator,
    aggregator: IntervalAggregator,
}

impl ReportPipeline {
    pub fn new(
        orders: Arc<dyn OrderQuery>,
        fees: Arc<dyn FeeLookup>,
        settings: PipelineSettings,
    ) -> Self {
        let aggregator = IntervalAggregator::new(orders, fees.clone())
            .with_statuses(settings.order_statuses.clone());

        Self {
            annotator: FeeAnnotator::new(fees),
            aggregator,
            settings,
        }
    }

    /// 從應用程序配置創建
    pub fn from_config(
        config: &ApplicationConfig,
        orders: Arc<dyn OrderQuery>,
        fees: Arc<dyn FeeLookup>,
    ) -> Self {
        Self::new(orders, fees, PipelineSettings::from_config(config))
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// 訂單報表查詢結果：每列加上 `stripe_fee`
    ///
    /// 結果格式不符時原樣返回。
    pub async fn orders_select(&self, results: Value) -> AnalyticsResult<Value> {
        let mut report = match OrdersReport::from_value(results) {
            Ok(report) => report,
            Err(raw) => {
                warn!("訂單報表結果格式不符，原樣返回");
                return Ok(raw);
            }
        };

        self.annotator.annotate_report(&mut report).await?;
        Ok(report.into_value())
    }

    /// 營收報表查詢結果：區間小計與總計加上 `stripe_fee`
    ///
    /// 結果格式不符時原樣返回。
    pub async fn revenue_select(&self, results: Value) -> AnalyticsResult<Value> {
        let mut report = match RevenueReport::from_value(results) {
            Ok(report) => report,
            Err(raw) => {
                warn!("營收報表結果格式不符，原樣返回");
                return Ok(raw);
            }
        };

        self.revenue_report(&mut report).await?;
        Ok(report.into_value())
    }

    /// 彙總已解析的營收報表
    pub async fn revenue_report(&self, report: &mut RevenueReport) -> AnalyticsResult<AggregationOutcome> {
        let outcome = self.aggregator.aggregate_report(report).await?;
        info!(
            intervals = report.intervals().len(),
            total_fee = %outcome.total_fee,
            "營收報表費用處理完成"
        );
        Ok(outcome)
    }

    pub fn orders_export_columns(&self, mut columns: ExportColumns) -> ExportColumns {
        append_fee_column(&mut columns, STRIPE_FEE_KEY, &self.settings.labels.orders_column);
        columns
    }

    /// 訂單匯出資料：讀取已註記資料列的費用
    pub fn orders_export_item(&self, item: ExportItem, row: &Value) -> ExportItem {
        match Container::from_value(row.clone()) {
            Ok(columns) => prepare_orders_export_item(item, &OrderRecord::from_container(columns)),
            Err(_) => {
                debug!("訂單匯出資料列不是容器，費用記為 0");
                let mut item = item;
                item.insert(STRIPE_FEE_KEY.to_string(), Value::from(0));
                item
            }
        }
    }

    pub fn revenue_export_columns(&self, mut columns: ExportColumns) -> ExportColumns {
        append_fee_column(&mut columns, STRIPE_FEE_KEY, &self.settings.labels.revenue_column);
        if self.settings.show_net_after_fees {
            append_net_after_fees_column(&mut columns, &self.settings.labels.net_after_fees_column);
        }
        columns
    }

    /// 營收匯出資料：讀取已彙總區間的 `subtotals.stripe_fee`
    pub fn revenue_export_item(&self, item: ExportItem, interval: &Value) -> ExportItem {
        let interval = Interval::from_value(interval.clone());
        let item = prepare_revenue_export_item(item, &interval);

        if !self.settings.show_net_after_fees {
            return item;
        }

        let subtotals = interval.subtotals();
        let fee = subtotals.and_then(|s| s.stripe_fee()).unwrap_or(Decimal::ZERO);
        let net_total = subtotals
            .and_then(|s| s.get_decimal(&self.settings.net_total_key))
            .unwrap_or(Decimal::ZERO);
        prepare_net_after_fees_item(item, net_total, fee)
    }

    pub fn revenue_charts(&self, charts: Vec<ChartConfig>) -> Vec<ChartConfig> {
        append_stripe_fee_chart(charts, &self.settings.labels.chart)
    }

    pub fn report_table(&self, table: ReportTable) -> ReportTable {
        augment_table(table, &self.settings)
    }
}
