#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use serde_json::Value;
use sqlx::MySqlPool;
use std::sync::Arc;

use stripe_fee_analytics::domain_types::{Interval, OrderId, OrderStatus, OrderSummary};
use stripe_fee_analytics::storage::{FeeLookup, InMemoryOrderStore, OrderQuery, TimeRange};

mock! {
    pub Orders {}

    #[async_trait]
    impl OrderQuery for Orders {
        async fn find_orders(&self, range: &TimeRange, statuses: &[OrderStatus]) -> anyhow::Result<Vec<OrderId>>;
        async fn get_order(&self, id: OrderId) -> anyhow::Result<Option<OrderSummary>>;
    }
}

mock! {
    pub Fees {}

    #[async_trait]
    impl FeeLookup for Fees {
        async fn stored_fee(&self, order_id: OrderId) -> anyhow::Result<Option<String>>;
    }
}

/// 測試用 UTC 時間
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// 建立記憶體訂單儲存：(訂單號, 狀態, 建立時間, 費用儲存值)
pub fn store_with(orders: &[(u64, OrderStatus, DateTime<Utc>, Option<&str>)]) -> Arc<InMemoryOrderStore> {
    let store = orders
        .iter()
        .fold(InMemoryOrderStore::new(), |store, (id, status, created, fee)| {
            store.with_order(OrderSummary::new(OrderId(*id), *status, *created), *fee)
        });
    Arc::new(store)
}

/// 2024 年 1 月到 3 月的訂單
pub fn quarter_store() -> Arc<InMemoryOrderStore> {
    store_with(&[
        (1, OrderStatus::Completed, utc(2024, 1, 5), Some("12.50")),
        (2, OrderStatus::Completed, utc(2024, 1, 9), None),
        (3, OrderStatus::Processing, utc(2024, 2, 2), Some("4.10")),
        (4, OrderStatus::OnHold, utc(2024, 2, 28), Some("0.90")),
        (5, OrderStatus::Cancelled, utc(2024, 2, 14), Some("9.99")),
        (6, OrderStatus::Completed, utc(2024, 3, 1), Some("not-a-number")),
        (7, OrderStatus::Refunded, utc(2024, 3, 3), Some("1.00")),
    ])
}

/// 將 JSON 陣列解析為區間列表
pub fn intervals_from(raw: Value) -> Vec<Interval> {
    match raw {
        Value::Array(items) => items.into_iter().map(Interval::from_value).collect(),
        other => panic!("expected array, got {}", other),
    }
}

/// 區間的起訖時間字串
pub fn date_pairs(intervals: &[Value]) -> Vec<(Value, Value)> {
    intervals
        .iter()
        .map(|interval| (interval["date_start"].clone(), interval["date_end"].clone()))
        .collect()
}

/// 測試資料庫連線，未設定 `TEST_DATABASE_URL` 時返回 None
pub async fn setup_test_db() -> Option<MySqlPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    match MySqlPool::connect(&database_url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            eprintln!("Failed to connect to test database: {}", e);
            None
        }
    }
}
