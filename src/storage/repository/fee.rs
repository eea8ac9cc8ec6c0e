use crate::domain_types::OrderId;
use crate::storage::repository::{DbExecutor, MySqlOrderRepository};
use crate::utils::parse_decimal_str;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// 訂單費用查詢特徵
///
/// 費用以訂單元數據儲存，只讀不寫。
#[async_trait]
pub trait FeeLookup: Send + Sync {
    /// 讀取原始儲存值，未設定時返回 None
    async fn stored_fee(&self, order_id: OrderId) -> Result<Option<String>>;

    /// 讀取費用金額，空值或非數值視為未設定
    async fn fee(&self, order_id: OrderId) -> Result<Option<Decimal>> {
        let stored = self.stored_fee(order_id).await?;
        Ok(stored.as_deref().and_then(parse_decimal_str))
    }
}

#[async_trait]
impl FeeLookup for MySqlOrderRepository {
    async fn stored_fee(&self, order_id: OrderId) -> Result<Option<String>> {
        let sql = self.tables().meta_value_sql();
        let value = sqlx::query_scalar::<_, Option<String>>(&sql)
            .bind(order_id.get())
            .bind(self.fee_meta_key())
            .fetch_optional(DbExecutor::get_pool(self))
            .await?;

        Ok(value.flatten())
    }
}
