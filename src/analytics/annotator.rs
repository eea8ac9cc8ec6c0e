use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::analytics::error::AnalyticsResult;
use crate::domain_types::{OrderRecord, OrdersReport, STRIPE_FEE_KEY};
use crate::storage::FeeLookup;
use crate::utils::decimal_to_value;

/// 訂單費用註記器
///
/// 每筆有訂單識別碼的報表列查詢一次費用，寫入 `stripe_fee`；
/// 查無費用或儲存值非數值時寫入 0。
pub struct FeeAnnotator {
    fees: Arc<dyn FeeLookup>,
}

impl FeeAnnotator {
    pub fn new(fees: Arc<dyn FeeLookup>) -> Self {
        Self { fees }
    }

    /// 註記報表列，保持輸入的順序與數量
    pub async fn annotate(&self, records: Vec<OrderRecord>) -> AnalyticsResult<Vec<OrderRecord>> {
        let mut annotated = Vec::with_capacity(records.len());

        for record in records {
            let fee = match record.order_id {
                Some(order_id) => {
                    let fee = self.fees.fee(order_id).await?;
                    trace!(%order_id, ?fee, "查詢訂單費用");
                    fee.unwrap_or(Decimal::ZERO)
                }
                None => {
                    debug!("報表列缺少訂單識別碼，費用記為 0");
                    Decimal::ZERO
                }
            };

            annotated.push(record.with_column(STRIPE_FEE_KEY, decimal_to_value(fee)));
        }

        Ok(annotated)
    }

    /// 註記整份訂單報表
    pub async fn annotate_report(&self, report: &mut OrdersReport) -> AnalyticsResult<()> {
        let rows = report.take_rows();
        let count = rows.len();
        report.set_rows(self.annotate(rows).await?);
        debug!(rows = count, "訂單報表費用註記完成");
        Ok(())
    }
}
