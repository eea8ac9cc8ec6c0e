use crate::domain_types::{OrderId, OrderStatus, OrderSummary};
use crate::storage::repository::{FeeLookup, OrderQuery, TimeRange};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredOrder {
    summary: OrderSummary,
    stored_fee: Option<String>,
}

/// 記憶體訂單儲存，用於示範與測試
///
/// 同時實現 `OrderQuery` 與 `FeeLookup`，費用以原始字串保存，
/// 與資料庫中的元數據一樣需要經過數值轉換。
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: BTreeMap<OrderId, StoredOrder>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入訂單與其費用儲存值
    pub fn insert(&mut self, summary: OrderSummary, stored_fee: Option<&str>) {
        self.orders.insert(
            summary.id,
            StoredOrder {
                summary,
                stored_fee: stored_fee.map(str::to_string),
            },
        );
    }

    /// 鏈式加入訂單
    pub fn with_order(mut self, summary: OrderSummary, stored_fee: Option<&str>) -> Self {
        self.insert(summary, stored_fee);
        self
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderQuery for InMemoryOrderStore {
    async fn find_orders(
        &self,
        range: &TimeRange,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderId>> {
        let mut matched: Vec<&OrderSummary> = self
            .orders
            .values()
            .map(|stored| &stored.summary)
            .filter(|summary| {
                summary.status.map_or(false, |status| statuses.contains(&status))
                    && summary
                        .date_created
                        .map_or(false, |created| range.contains(&created))
            })
            .collect();

        matched.sort_by_key(|summary| (summary.date_created, summary.id));
        Ok(matched.into_iter().map(|summary| summary.id).collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<OrderSummary>> {
        Ok(self.orders.get(&id).map(|stored| stored.summary.clone()))
    }
}

#[async_trait]
impl FeeLookup for InMemoryOrderStore {
    async fn stored_fee(&self, order_id: OrderId) -> Result<Option<String>> {
        Ok(self
            .orders
            .get(&order_id)
            .and_then(|stored| stored.stored_fee.clone()))
    }
}
