use crate::config::OrderStorageLayout;
use crate::utils::time_utils::report_range_to_utc_range;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::MySqlPool;

// 重新導出子模塊
pub mod fee;
pub mod memory;
pub mod order;

// 重新導出常用類型
pub use fee::FeeLookup;
pub use order::OrderQuery;

// 重新導出具體實現
pub use memory::InMemoryOrderStore;
pub use order::MySqlOrderRepository;

/// 時間範圍查詢（左閉右開：start <= t < end）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 從報表區間的起訖時間建立
    pub fn from_report_range(start: &NaiveDateTime, end: &NaiveDateTime) -> Self {
        let (start, end) = report_range_to_utc_range(start, end);
        Self { start, end }
    }

    /// 檢查時間點是否落在範圍內
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// 起點不早於終點時，範圍內沒有任何時間點
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// 通用的數據庫操作特性
pub trait DbExecutor {
    fn get_pool(&self) -> &MySqlPool;
}

/// 訂單儲存表名稱
///
/// HPOS 使用 `wc_orders` / `wc_orders_meta`，舊版使用 `posts` / `postmeta`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub orders: String,
    pub order_id: String,
    pub order_status: String,
    pub order_type: String,
    pub order_date: String,
    pub meta: String,
    pub meta_pk: String,
    pub meta_order_id: String,
}

impl TableNames {
    /// 依儲存佈局與表前綴建立表名稱
    pub fn for_layout(layout: OrderStorageLayout, prefix: &str) -> Self {
        match layout {
            OrderStorageLayout::Hpos => Self {
                orders: format!("{}wc_orders", prefix),
                order_id: "id".to_string(),
                order_status: "status".to_string(),
                order_type: "type".to_string(),
                order_date: "date_created_gmt".to_string(),
                meta: format!("{}wc_orders_meta", prefix),
                meta_pk: "id".to_string(),
                meta_order_id: "order_id".to_string(),
            },
            OrderStorageLayout::Legacy => Self {
                orders: format!("{}posts", prefix),
                order_id: "ID".to_string(),
                order_status: "post_status".to_string(),
                order_type: "post_type".to_string(),
                order_date: "post_date_gmt".to_string(),
                meta: format!("{}postmeta", prefix),
                meta_pk: "meta_id".to_string(),
                meta_order_id: "post_id".to_string(),
            },
        }
    }

    /// 區間訂單查詢，狀態數量決定佔位符數量
    pub fn find_orders_sql(&self, status_count: usize) -> String {
        let placeholders = vec!["?"; status_count.max(1)].join(", ");
        format!(
            "SELECT {id} FROM {table} \
             WHERE {kind} = 'shop_order' \
             AND {status} IN ({placeholders}) \
             AND {date} >= ? AND {date} < ? \
             ORDER BY {date}, {id}",
            id = self.order_id,
            table = self.orders,
            kind = self.order_type,
            status = self.order_status,
            date = self.order_date,
            placeholders = placeholders,
        )
    }

    /// 單一訂單查詢
    pub fn get_order_sql(&self) -> String {
        format!(
            "SELECT {id}, {status}, {date} FROM {table} \
             WHERE {id} = ? AND {kind} = 'shop_order'",
            id = self.order_id,
            status = self.order_status,
            date = self.order_date,
            table = self.orders,
            kind = self.order_type,
        )
    }

    /// 訂單元數據查詢，取最早寫入的一筆
    pub fn meta_value_sql(&self) -> String {
        format!(
            "SELECT meta_value FROM {meta} \
             WHERE {order_id} = ? AND meta_key = ? \
             ORDER BY {pk} LIMIT 1",
            meta = self.meta,
            order_id = self.meta_order_id,
            pk = self.meta_pk,
        )
    }
}
