use serde::{Serialize, Deserialize};
use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::domain_types::OrderStatus;

/// 應用程序配置結構
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub fees: FeeConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.database.validate()?;
        self.log.validate()?;
        self.fees.validate()?;
        self.labels.validate()?;
        self.report.validate()?;

        Ok(())
    }
}

/// 訂單儲存佈局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStorageLayout {
    /// 高效能訂單儲存（wc_orders / wc_orders_meta）
    #[default]
    Hpos,
    /// 舊版文章表（posts / postmeta）
    Legacy,
}

/// 數據庫配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    #[serde(default)]
    pub layout: OrderStorageLayout,
}

fn default_table_prefix() -> String {
    "wp_".to_string()
}

impl Validator for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證數據庫配置
        ValidationUtils::not_empty(&self.host, "database.host")?;
        ValidationUtils::not_empty(&self.username, "database.username")?;
        ValidationUtils::not_empty(&self.database, "database.database")?;
        ValidationUtils::in_range(self.port, 1..=65535, "database.port")?;
        ValidationUtils::in_range(self.max_connections, self.min_connections.max(1)..=1000, "database.max_connections")?;
        ValidationUtils::identifier(&self.table_prefix, "database.table_prefix")?;

        Ok(())
    }
}

impl DatabaseConfig {
    /// 獲取最大生命週期持續時間
    pub fn max_lifetime(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.max_lifetime_secs)
    }

    /// 獲取獲取連接超時持續時間
    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_secs)
    }

    /// 獲取閒置超時持續時間
    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.idle_timeout_secs)
    }
}

/// 日誌配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(&self.level, &["trace", "debug", "info", "warn", "error"], "log.level")?;
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 費用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// 訂單元數據中的費用鍵
    #[serde(default = "default_meta_key")]
    pub meta_key: String,
    /// 計入區間費用的訂單狀態
    #[serde(default = "default_order_statuses")]
    pub order_statuses: Vec<OrderStatus>,
    /// 顯示金額時使用的貨幣符號
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_meta_key() -> String {
    "_stripe_fee".to_string()
}

fn default_order_statuses() -> Vec<OrderStatus> {
    OrderStatus::REPORTABLE.to_vec()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            meta_key: default_meta_key(),
            order_statuses: default_order_statuses(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Validator for FeeConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.meta_key, "fees.meta_key")?;
        ValidationUtils::not_empty_list(&self.order_statuses, "fees.order_statuses")?;

        Ok(())
    }
}

/// 欄位與圖表標籤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub orders_column: String,
    pub revenue_column: String,
    pub net_after_fees_column: String,
    pub chart: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            orders_column: "Stripe Fee".to_string(),
            revenue_column: "Stripe Fees".to_string(),
            net_after_fees_column: "Net After Fees".to_string(),
            chart: "Stripe Fees".to_string(),
        }
    }
}

impl Validator for LabelConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.orders_column, "labels.orders_column")?;
        ValidationUtils::not_empty(&self.revenue_column, "labels.revenue_column")?;
        ValidationUtils::not_empty(&self.net_after_fees_column, "labels.net_after_fees_column")?;
        ValidationUtils::not_empty(&self.chart, "labels.chart")?;

        Ok(())
    }
}

/// 報表呈現配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 是否顯示並匯出扣除費用後淨額
    #[serde(default)]
    pub show_net_after_fees: bool,
    /// 小計中的淨額鍵
    #[serde(default = "default_net_total_key")]
    pub net_total_key: String,
}

fn default_net_total_key() -> String {
    "net_revenue".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_net_after_fees: false,
            net_total_key: default_net_total_key(),
        }
    }
}

impl Validator for ReportConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::check_dependency(
            self.show_net_after_fees,
            !self.net_total_key.trim().is_empty(),
            "report.show_net_after_fees",
            "report.net_total_key",
        )?;

        Ok(())
    }
}
