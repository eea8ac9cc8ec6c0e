use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::container::{Container, Shape};
use super::STRIPE_FEE_KEY;
use crate::utils::decimal_from_value;

/// 訂單識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// 從報表欄位值解析訂單識別碼，接受正整數或數字字串
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(OrderId),
            Value::String(s) => s.trim().parse::<u64>().ok().map(OrderId),
            _ => None,
        }
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId(id)
    }
}

/// 訂單狀態枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    CheckoutDraft,
}

impl OrderStatus {
    /// 計入營收報表的狀態
    pub const REPORTABLE: [OrderStatus; 3] = [
        OrderStatus::Completed,
        OrderStatus::Processing,
        OrderStatus::OnHold,
    ];

    /// 所有狀態
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::OnHold,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
        OrderStatus::Failed,
        OrderStatus::CheckoutDraft,
    ];

    /// 狀態名稱（例如 `on-hold`）
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
            OrderStatus::CheckoutDraft => "checkout-draft",
        }
    }

    /// 資料庫中儲存的狀態鍵（例如 `wc-on-hold`）
    pub fn storage_key(&self) -> String {
        format!("wc-{}", self.as_str())
    }

    /// 從資料庫狀態鍵解析，`wc-` 前綴可有可無
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix("wc-").unwrap_or(key).parse().ok()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("未知的訂單狀態: {}", s))
    }
}

/// 訂單摘要，由訂單查詢來源提供
///
/// 自訂狀態無法對應到 `OrderStatus` 時為 None。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: Option<OrderStatus>,
    pub date_created: Option<DateTime<Utc>>,
}

impl OrderSummary {
    pub fn new(id: OrderId, status: OrderStatus, date_created: DateTime<Utc>) -> Self {
        Self {
            id,
            status: Some(status),
            date_created: Some(date_created),
        }
    }
}

/// 訂單報表中的一列
///
/// `columns` 保留上游的全部欄位與結構，費用註記只會新增 `stripe_fee` 一欄。
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_id: Option<OrderId>,
    pub columns: Container,
}

impl OrderRecord {
    /// 建立只有訂單識別碼的報表列
    pub fn new(order_id: OrderId) -> Self {
        let mut columns = Container::new(Shape::Record);
        columns.insert("order_id", Value::from(order_id.get()));
        Self {
            order_id: Some(order_id),
            columns,
        }
    }

    /// 從上游欄位容器建立報表列
    pub fn from_container(columns: Container) -> Self {
        let order_id = columns.get("order_id").and_then(OrderId::from_value);
        Self { order_id, columns }
    }

    /// 附加欄位
    pub fn with_column(mut self, key: impl Into<String>, value: Value) -> Self {
        self.columns.insert(key, value);
        self
    }

    /// 讀取已註記的費用，未註記或非數值時為 None
    pub fn stripe_fee(&self) -> Option<Decimal> {
        self.columns.get(STRIPE_FEE_KEY).and_then(decimal_from_value)
    }

    pub fn into_value(self) -> Value {
        self.columns.into_value()
    }
}
