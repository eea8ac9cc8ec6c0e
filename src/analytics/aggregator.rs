use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analytics::error::AnalyticsResult;
use crate::domain_types::{Interval, OrderStatus, RevenueReport};
use crate::storage::{FeeLookup, OrderQuery, TimeRange};

/// 區間彙總結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationOutcome {
    /// 全部已寫入區間的費用總和
    pub total_fee: Decimal,
    pub intervals_processed: usize,
    /// 缺少起訖時間或無法寫入小計的區間數
    pub intervals_skipped: usize,
    pub orders_scanned: usize,
    /// 沒有費用元數據或值非數值的訂單數
    pub orders_missing_fee: usize,
}

/// 區間費用彙總器
///
/// 對每個區間查詢建立時間落在 `[date_start, date_end)` 的訂單，
/// 將費用加總寫入 `subtotals.stripe_fee`。
pub struct IntervalAggregator {
    orders: Arc<dyn OrderQuery>,
    fees: Arc<dyn FeeLookup>,
    statuses: Vec<OrderStatus>,
}

impl IntervalAggregator {
    /// 創建彙總器，使用預設的訂單狀態清單
    pub fn new(orders: Arc<dyn OrderQuery>, fees: Arc<dyn FeeLookup>) -> Self {
        Self {
            orders,
            fees,
            statuses: OrderStatus::REPORTABLE.to_vec(),
        }
    }

    /// 設定計入費用的訂單狀態
    pub fn with_statuses(mut self, statuses: Vec<OrderStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn statuses(&self) -> &[OrderStatus] {
        &self.statuses
    }

    /// 依序彙總每個區間的費用
    pub async fn aggregate(&self, intervals: &mut [Interval]) -> AnalyticsResult<AggregationOutcome> {
        let mut outcome = AggregationOutcome::default();

        if intervals.is_empty() {
            debug!("沒有區間，略過費用彙總");
            return Ok(outcome);
        }

        for (index, interval) in intervals.iter_mut().enumerate() {
            let Some((start, end)) = interval.date_range() else {
                debug!(index, "區間缺少起訖時間，略過費用計算");
                outcome.intervals_skipped += 1;
                continue;
            };

            if !interval.subtotals_writable() {
                warn!(index, "區間小計不是容器，略過費用計算");
                outcome.intervals_skipped += 1;
                continue;
            }

            let range = TimeRange::from_report_range(&start, &end);
            let fee = self.interval_fee(&range, &mut outcome).await?;

            if let Some(subtotals) = interval.subtotals_mut() {
                subtotals.set_stripe_fee(fee);
            }

            outcome.total_fee += fee;
            outcome.intervals_processed += 1;
        }

        info!(
            total_fee = %outcome.total_fee,
            processed = outcome.intervals_processed,
            skipped = outcome.intervals_skipped,
            orders = outcome.orders_scanned,
            "區間費用彙總完成"
        );

        Ok(outcome)
    }

    /// 彙總報表區間並將總和寫入 `totals.stripe_fee`
    ///
    /// 缺少總計時以報表結構建立；總計為純量值時保持不變。
    pub async fn aggregate_report(&self, report: &mut RevenueReport) -> AnalyticsResult<AggregationOutcome> {
        let outcome = self.aggregate(report.intervals_mut()).await?;

        match report.totals_mut() {
            Some(totals) => totals.set_stripe_fee(outcome.total_fee),
            None => warn!("報表總計不是容器，費用總和未寫入"),
        }

        Ok(outcome)
    }

    async fn interval_fee(
        &self,
        range: &TimeRange,
        outcome: &mut AggregationOutcome,
    ) -> AnalyticsResult<Decimal> {
        let mut fee = Decimal::ZERO;

        if range.is_empty() {
            return Ok(fee);
        }

        let order_ids = self.orders.find_orders(range, &self.statuses).await?;
        for order_id in order_ids {
            if self.orders.get_order(order_id).await?.is_none() {
                debug!(%order_id, "訂單不存在，略過");
                continue;
            }

            outcome.orders_scanned += 1;
            match self.fees.fee(order_id).await? {
                Some(amount) => fee += amount,
                None => outcome.orders_missing_fee += 1,
            }
        }

        Ok(fee)
    }
}
