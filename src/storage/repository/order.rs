use crate::config::{ApplicationConfig, OrderStorageLayout};
use crate::domain_types::{OrderId, OrderStatus, OrderSummary};
use crate::storage::repository::{DbExecutor, TableNames, TimeRange};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::debug;

/// 訂單查詢來源特徵
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// 查詢建立時間落在範圍內（左閉右開）且狀態在允許清單中的全部訂單
    async fn find_orders(
        &self,
        range: &TimeRange,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderId>>;

    /// 獲取單一訂單，不存在時返回 None
    async fn get_order(&self, id: OrderId) -> Result<Option<OrderSummary>>;
}

/// MySQL 訂單儲存庫實現，支援 HPOS 與舊版文章表兩種佈局
pub struct MySqlOrderRepository {
    pool: Arc<MySqlPool>,
    tables: TableNames,
    fee_meta_key: String,
}

impl MySqlOrderRepository {
    /// 預設的費用元數據鍵
    pub const DEFAULT_FEE_META_KEY: &'static str = "_stripe_fee";

    /// 創建新的訂單儲存庫
    pub fn new(pool: Arc<MySqlPool>, layout: OrderStorageLayout, table_prefix: &str) -> Self {
        Self {
            pool,
            tables: TableNames::for_layout(layout, table_prefix),
            fee_meta_key: Self::DEFAULT_FEE_META_KEY.to_string(),
        }
    }

    /// 從應用程序配置創建，表佈局取自 `database`，費用鍵取自 `fees.meta_key`
    pub fn from_config(pool: Arc<MySqlPool>, config: &ApplicationConfig) -> Self {
        Self::new(pool, config.database.layout, &config.database.table_prefix)
            .with_fee_meta_key(config.fees.meta_key.clone())
    }

    /// 設定費用元數據鍵
    pub fn with_fee_meta_key(mut self, meta_key: impl Into<String>) -> Self {
        self.fee_meta_key = meta_key.into();
        self
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    pub fn fee_meta_key(&self) -> &str {
        &self.fee_meta_key
    }
}

impl DbExecutor for MySqlOrderRepository {
    fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl OrderQuery for MySqlOrderRepository {
    async fn find_orders(
        &self,
        range: &TimeRange,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderId>> {
        if statuses.is_empty() || range.is_empty() {
            return Ok(Vec::new());
        }

        let sql = self.tables.find_orders_sql(statuses.len());
        let mut query = sqlx::query_scalar::<_, u64>(&sql);
        for status in statuses {
            query = query.bind(status.storage_key());
        }

        let ids = query
            .bind(range.start.naive_utc())
            .bind(range.end.naive_utc())
            .fetch_all(DbExecutor::get_pool(self))
            .await?;

        debug!(
            "查詢到 {} 筆訂單，範圍 {} ~ {}",
            ids.len(),
            range.start,
            range.end
        );

        Ok(ids.into_iter().map(OrderId).collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<OrderSummary>> {
        let sql = self.tables.get_order_sql();
        let row = sqlx::query_as::<_, (u64, String, Option<NaiveDateTime>)>(&sql)
            .bind(id.get())
            .fetch_optional(DbExecutor::get_pool(self))
            .await?;

        Ok(row.map(|(order_id, status, date_created)| OrderSummary {
            id: OrderId(order_id),
            status: OrderStatus::from_storage_key(&status),
            date_created: date_created.map(|dt| dt.and_utc()),
        }))
    }
}
