//! 管理後台報表表格與圖表的描述類型

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 表格欄位標頭
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableHeader {
    pub label: String,
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_sortable: bool,
    #[serde(default)]
    pub is_numeric: bool,
}

/// 表格儲存格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub display: String,
    pub value: Value,
}

/// 表格資料來源項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableItems {
    #[serde(default)]
    pub data: Vec<Value>,
}

/// 報表表格資料
///
/// `rows` 與 `items.data` 以索引一一對應。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub endpoint: String,
    pub headers: Vec<TableHeader>,
    pub rows: Vec<Vec<TableCell>>,
    #[serde(default)]
    pub items: TableItems,
}

impl ReportTable {
    /// 指定列對應的資料項目
    pub fn item(&self, index: usize) -> Option<&Value> {
        self.items.data.get(index)
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// 圖表數值類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Currency,
    Number,
    Average,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Currency => write!(f, "currency"),
            ChartType::Number => write!(f, "number"),
            ChartType::Average => write!(f, "average"),
        }
    }
}

/// 營收報表圖表配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub key: String,
    pub label: String,
    pub order: SortOrder,
    pub orderby: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default)]
    pub is_reverse_trend: bool,
}
